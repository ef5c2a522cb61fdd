use chrono::NaiveDate;
use rental_undo::{Error, Shop};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ids(shop: &Shop) -> Vec<u32> {
    shop.clients().list().iter().map(|c| c.id).collect()
}

#[test]
fn add_clients_then_walk_history() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.add_client(2, "B").unwrap();
    assert_eq!(shop.manager().cursor(), Some(1));

    shop.undo().unwrap();
    assert_eq!(ids(&shop), [1]);
    assert_eq!(shop.manager().cursor(), Some(0));

    shop.undo().unwrap();
    assert!(ids(&shop).is_empty());
    assert_eq!(shop.manager().cursor(), None);

    assert_eq!(shop.undo(), Err(Error::UndoUnavailable));
    assert_eq!(shop.manager().cursor(), None);
    assert_eq!(shop.manager().len(), 2);

    shop.redo().unwrap();
    assert_eq!(ids(&shop), [1]);
    assert_eq!(shop.manager().cursor(), Some(0));

    shop.redo().unwrap();
    assert_eq!(ids(&shop), [1, 2]);
    assert_eq!(shop.manager().cursor(), Some(1));

    assert_eq!(shop.redo(), Err(Error::RedoUnavailable));
    assert_eq!(shop.clients().get(2).unwrap().name, "B");
}

#[test]
fn rent_then_walk_history() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.add_movie(1, "T", "D", "G").unwrap();
    shop.rent_movie(5, 1, 1, date(2021, 3, 1), date(2021, 3, 8))
        .unwrap();
    let rented = shop.rentals().get(5).unwrap();

    shop.undo().unwrap();
    assert!(shop.rentals().get(5).is_err());
    assert!(shop.rentals().list().is_empty());

    shop.redo().unwrap();
    let again = shop.rentals().get(5).unwrap();
    assert_eq!(again, rented);
    assert_eq!(again.rented_date, date(2021, 3, 1));
    assert_eq!(again.due_date, date(2021, 3, 8));
    assert_eq!(again.returned_date, None);
}

#[test]
fn record_after_undo_truncates() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.add_client(2, "B").unwrap();
    shop.add_client(3, "C").unwrap();
    assert_eq!(shop.manager().cursor(), Some(2));

    shop.undo().unwrap();
    shop.undo().unwrap();
    assert_eq!(shop.manager().cursor(), Some(0));

    shop.add_client(4, "D").unwrap();
    assert_eq!(shop.manager().len(), 2);
    assert_eq!(shop.manager().cursor(), Some(1));
    assert_eq!(shop.redo(), Err(Error::RedoUnavailable));
    assert_eq!(ids(&shop), [1, 4]);
}

#[test]
fn unavailable_errors() {
    let mut shop = Shop::in_memory();
    assert_eq!(shop.undo(), Err(Error::UndoUnavailable));
    assert_eq!(shop.redo(), Err(Error::RedoUnavailable));
    assert!(shop.undo().unwrap_err().is_unavailable());
    assert!(shop.manager().is_empty());

    shop.add_client(1, "A").unwrap();
    assert_eq!(shop.redo(), Err(Error::RedoUnavailable));
    assert_eq!(shop.manager().len(), 1);
}

#[test]
fn undo_fails_when_state_changed_behind_the_manager() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.clients().remove(1).unwrap();
    let err = shop.undo().unwrap_err();
    assert!(!err.is_unavailable());
    assert_eq!(shop.manager().cursor(), Some(0));
}

#[test]
fn texts_describe_the_operations() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.update_client(1, "B").unwrap();
    assert_eq!(
        shop.manager().undo_text().as_deref(),
        Some("rename client #1 to `B`")
    );
    shop.undo().unwrap();
    assert_eq!(shop.manager().undo_text().as_deref(), Some("add client #1 `A`"));
    assert_eq!(
        shop.manager().redo_text().as_deref(),
        Some("rename client #1 to `B`")
    );
}

#[test]
fn display() {
    let mut shop = Shop::in_memory();
    shop.add_client(1, "A").unwrap();
    shop.add_movie(7, "T", "D", "G").unwrap();
    shop.undo().unwrap();
    let mut display = shop.manager().display();
    display.detailed(false);
    #[cfg(feature = "colored")]
    display.colored(false);
    assert_eq!(
        display.to_string(),
        "2 add movie #7 `T`\n1 [HEAD] add client #1 `A`\n0\n"
    );
}
