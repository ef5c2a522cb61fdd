//! A movie rental shop with linear undo-redo.
//!
//! Clients, movies and rentals live in [`Repository`] implementations and are
//! changed through the [`ClientService`], [`MovieService`] and [`RentalService`].
//! Every change made through the [`Shop`] is recorded in an [`OperationManager`]
//! as an [`OperationRecord`]: a pair of [`ReversibleAction`]s, one that reverts
//! the change and one that applies it again. An action is a deferred call made
//! of a shared service, a [`Handler`] selecting the method, and the arguments
//! captured when the change was made.
//!
//! # Features
//!
//! * [`OperationManager`] provides linear undo-redo. Recording a new operation
//!   after an undo drops the undone operations.
//! * Removing a client or a movie also removes its rentals, and undoing the
//!   removal brings them back.
//! * The manager can notify a [`Slot`] when it gains or loses the ability to
//!   undo or redo.
//! * Configurable display formatting of the history, colored when the
//!   `colored` feature is enabled.
//! * Serialization of the entities and calls when the `serde` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use rental_undo::{Error, Shop};
//!
//! fn main() -> rental_undo::Result {
//!     let day = |d| NaiveDate::from_ymd_opt(2020, 5, d).unwrap();
//!     let mut shop = Shop::in_memory();
//!     shop.add_client(1, "Ann")?;
//!     shop.add_movie(1, "Alien", "In space no one can hear you scream.", "horror")?;
//!     shop.rent_movie(1, 1, 1, day(1), day(10))?;
//!     assert_eq!(shop.rentals().list().len(), 1);
//!
//!     shop.remove_client(1)?;
//!     assert!(shop.rentals().list().is_empty());
//!     shop.undo()?;
//!     assert_eq!(shop.rentals().list().len(), 1);
//!
//!     shop.undo()?;
//!     shop.undo()?;
//!     shop.undo()?;
//!     assert_eq!(shop.undo(), Err(Error::UndoUnavailable));
//!     assert!(shop.clients().list().is_empty());
//!
//!     shop.redo()?;
//!     shop.redo()?;
//!     shop.redo()?;
//!     assert_eq!(shop.rentals().get(1)?.client_id, 1);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/rental-undo")]
#![deny(missing_docs)]

mod action;
mod domain;
mod entry;
mod error;
mod format;
mod manager;
mod operation;
mod repository;
mod service;
mod shop;
mod socket;

pub use self::{
    action::{ClientCall, Dispatch, Handler, Invoke, MovieCall, RentalCall, ReversibleAction},
    domain::{Client, Entity, Movie, Rental},
    entry::Entry,
    error::{EntityKind, Error, Result},
    manager::{Builder, Display, OperationManager},
    operation::{OperationKind, OperationRecord},
    repository::{shared, MemoryRepository, Repository, Shared},
    service::{
        ClientField, ClientRentedDays, ClientService, MovieField, MovieRentedDays, MovieService,
        RemovedClient, RemovedMovie, RentalOverdueDays, RentalService,
    },
    shop::Shop,
    socket::{Signal, Slot},
};
