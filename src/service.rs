//! Services that mutate the repositories.
//!
//! Every mutation a [`ReversibleAction`](crate::ReversibleAction) can replay is a
//! method on one of these services.

mod client;
mod movie;
mod rental;

pub use self::{
    client::{ClientField, ClientService, RemovedClient},
    movie::{MovieField, MovieService, RemovedMovie},
    rental::{ClientRentedDays, MovieRentedDays, RentalOverdueDays, RentalService},
};

/// Case-insensitive substring match used by the searches.
fn contains_ignore_case(text: &str, query: &str) -> bool {
    text.to_lowercase().contains(&query.trim().to_lowercase())
}
