use chrono::NaiveDate;
use rental_undo::{OperationManager, Shop, Signal};

fn main() -> rental_undo::Result {
    tracing_subscriber::fmt::init();

    let manager = OperationManager::builder()
        .capacity(16)
        .connect(|signal: Signal| println!("signal: {:?}", signal))
        .build();
    let mut shop = Shop::in_memory_with(manager);
    let day = |d| NaiveDate::from_ymd_opt(2020, 5, d).unwrap();

    shop.add_client(1, "Ann")?;
    shop.add_client(2, "Bob")?;
    shop.add_movie(1, "Alien", "In space no one can hear you scream.", "horror")?;
    shop.add_movie(2, "Heat", "A heist in Los Angeles.", "crime")?;
    shop.rent_movie(1, 1, 1, day(1), day(8))?;
    shop.rent_movie(2, 2, 2, day(2), day(9))?;
    shop.return_movie(1, day(6))?;
    shop.update_client(2, "Robert")?;
    shop.remove_movie(2)?;

    shop.undo()?;
    shop.undo()?;
    println!("{}", shop.manager().display());

    shop.redo()?;
    for rental in shop.rentals().list() {
        println!("{}", rental);
    }
    for late in shop.rentals().late_rentals(day(20))? {
        println!("{}", late);
    }
    Ok(())
}
