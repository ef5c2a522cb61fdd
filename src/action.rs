//! Deferred calls on the domain services.

use crate::{ClientService, MovieService, Rental, RentalService, Result};
use chrono::NaiveDate;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Something that can be invoked by the [`OperationManager`](crate::OperationManager).
pub trait Invoke {
    /// Performs the deferred call and returns `Ok` if everything went fine,
    /// and `Err` if the target rejected it.
    fn invoke(&self) -> Result;
}

impl<I: Invoke + ?Sized> Invoke for Box<I> {
    fn invoke(&self) -> Result {
        (**self).invoke()
    }
}

/// Maps a call value to the method of the service that performs it.
pub trait Dispatch {
    /// The calls this service understands.
    type Call;

    /// Performs `call` on the service.
    fn dispatch(&self, call: &Self::Call) -> Result;
}

/// Symbolic name of the procedure a [`ReversibleAction`] runs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Handler {
    /// [`ClientService::add`].
    AddClient,
    /// [`ClientService::add_client_and_rentals`].
    AddClientAndRentals,
    /// [`ClientService::remove`].
    RemoveClient,
    /// [`ClientService::update`].
    UpdateClient,
    /// [`MovieService::add`].
    AddMovie,
    /// [`MovieService::add_movie_and_rentals`].
    AddMovieAndRentals,
    /// [`MovieService::remove`].
    RemoveMovie,
    /// [`MovieService::update`].
    UpdateMovie,
    /// [`RentalService::add_rental`].
    AddRental,
    /// [`RentalService::delete_rental`].
    DeleteRental,
    /// [`RentalService::return_movie`].
    ReturnMovie,
    /// [`RentalService::cancel_return`].
    CancelReturn,
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Handler::AddClient => "add client",
            Handler::AddClientAndRentals => "add client and rentals",
            Handler::RemoveClient => "remove client",
            Handler::UpdateClient => "update client",
            Handler::AddMovie => "add movie",
            Handler::AddMovieAndRentals => "add movie and rentals",
            Handler::RemoveMovie => "remove movie",
            Handler::UpdateMovie => "update movie",
            Handler::AddRental => "add rental",
            Handler::DeleteRental => "delete rental",
            Handler::ReturnMovie => "return movie",
            Handler::CancelReturn => "cancel return",
        })
    }
}

/// Arguments of a call on the [`ClientService`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClientCall {
    /// Adds the client.
    Add {
        /// Client id.
        id: u32,
        /// Client name.
        name: String,
    },
    /// Adds the client back together with its removed rentals.
    AddWithRentals {
        /// Client id.
        id: u32,
        /// Client name.
        name: String,
        /// Rentals removed with the client.
        rentals: Vec<Rental>,
    },
    /// Removes the client and its rentals.
    Remove {
        /// Client id.
        id: u32,
    },
    /// Renames the client.
    Update {
        /// Client id.
        id: u32,
        /// Name to set.
        name: String,
    },
}

impl ClientCall {
    /// Returns the selector of the call.
    pub fn handler(&self) -> Handler {
        match self {
            ClientCall::Add { .. } => Handler::AddClient,
            ClientCall::AddWithRentals { .. } => Handler::AddClientAndRentals,
            ClientCall::Remove { .. } => Handler::RemoveClient,
            ClientCall::Update { .. } => Handler::UpdateClient,
        }
    }
}

impl fmt::Display for ClientCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientCall::Add { id, name } => write!(f, "add client #{} `{}`", id, name),
            ClientCall::AddWithRentals { id, name, rentals } => write!(
                f,
                "add client #{} `{}` with {} rental(s)",
                id,
                name,
                rentals.len()
            ),
            ClientCall::Remove { id } => write!(f, "remove client #{}", id),
            ClientCall::Update { id, name } => write!(f, "rename client #{} to `{}`", id, name),
        }
    }
}

impl Dispatch for ClientService {
    type Call = ClientCall;

    fn dispatch(&self, call: &ClientCall) -> Result {
        match call {
            ClientCall::Add { id, name } => self.add(*id, name),
            ClientCall::AddWithRentals { id, name, rentals } => {
                self.add_client_and_rentals(*id, name, rentals)
            }
            ClientCall::Remove { id } => self.remove(*id).map(drop),
            ClientCall::Update { id, name } => self.update(*id, name).map(drop),
        }
    }
}

/// Arguments of a call on the [`MovieService`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MovieCall {
    /// Adds the movie.
    Add {
        /// Movie id.
        id: u32,
        /// Title.
        title: String,
        /// Description.
        description: String,
        /// Genre.
        genre: String,
    },
    /// Adds the movie back together with its removed rentals.
    AddWithRentals {
        /// Movie id.
        id: u32,
        /// Title.
        title: String,
        /// Description.
        description: String,
        /// Genre.
        genre: String,
        /// Rentals removed with the movie.
        rentals: Vec<Rental>,
    },
    /// Removes the movie and its rentals.
    Remove {
        /// Movie id.
        id: u32,
    },
    /// Replaces the attributes of the movie.
    Update {
        /// Movie id.
        id: u32,
        /// Title to set.
        title: String,
        /// Description to set.
        description: String,
        /// Genre to set.
        genre: String,
    },
}

impl MovieCall {
    /// Returns the selector of the call.
    pub fn handler(&self) -> Handler {
        match self {
            MovieCall::Add { .. } => Handler::AddMovie,
            MovieCall::AddWithRentals { .. } => Handler::AddMovieAndRentals,
            MovieCall::Remove { .. } => Handler::RemoveMovie,
            MovieCall::Update { .. } => Handler::UpdateMovie,
        }
    }
}

impl fmt::Display for MovieCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MovieCall::Add { id, title, .. } => write!(f, "add movie #{} `{}`", id, title),
            MovieCall::AddWithRentals {
                id, title, rentals, ..
            } => write!(
                f,
                "add movie #{} `{}` with {} rental(s)",
                id,
                title,
                rentals.len()
            ),
            MovieCall::Remove { id } => write!(f, "remove movie #{}", id),
            MovieCall::Update { id, title, .. } => write!(f, "update movie #{} to `{}`", id, title),
        }
    }
}

impl Dispatch for MovieService {
    type Call = MovieCall;

    fn dispatch(&self, call: &MovieCall) -> Result {
        match call {
            MovieCall::Add {
                id,
                title,
                description,
                genre,
            } => self.add(*id, title, description, genre),
            MovieCall::AddWithRentals {
                id,
                title,
                description,
                genre,
                rentals,
            } => self.add_movie_and_rentals(*id, title, description, genre, rentals),
            MovieCall::Remove { id } => self.remove(*id).map(drop),
            MovieCall::Update {
                id,
                title,
                description,
                genre,
            } => self.update(*id, title, description, genre).map(drop),
        }
    }
}

/// Arguments of a call on the [`RentalService`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RentalCall {
    /// Rents the movie, checking the renting rules.
    Add {
        /// Rental id.
        id: u32,
        /// Rented movie.
        movie_id: u32,
        /// Renting client.
        client_id: u32,
        /// Day of the rental.
        rented: NaiveDate,
        /// Due day.
        due: NaiveDate,
    },
    /// Deletes the rental.
    Delete {
        /// Rental id.
        id: u32,
    },
    /// Marks the rental as returned.
    Return {
        /// Rental id.
        id: u32,
        /// Day of the return.
        date: NaiveDate,
    },
    /// Clears the return date.
    CancelReturn {
        /// Rental id.
        id: u32,
    },
}

impl RentalCall {
    /// Returns the selector of the call.
    pub fn handler(&self) -> Handler {
        match self {
            RentalCall::Add { .. } => Handler::AddRental,
            RentalCall::Delete { .. } => Handler::DeleteRental,
            RentalCall::Return { .. } => Handler::ReturnMovie,
            RentalCall::CancelReturn { .. } => Handler::CancelReturn,
        }
    }
}

impl fmt::Display for RentalCall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RentalCall::Add {
                id,
                movie_id,
                client_id,
                rented,
                due,
            } => write!(
                f,
                "rent movie #{} to client #{} as rental #{} ({} - {})",
                movie_id, client_id, id, rented, due
            ),
            RentalCall::Delete { id } => write!(f, "delete rental #{}", id),
            RentalCall::Return { id, date } => write!(f, "return rental #{} on {}", id, date),
            RentalCall::CancelReturn { id } => write!(f, "cancel return of rental #{}", id),
        }
    }
}

impl Dispatch for RentalService {
    type Call = RentalCall;

    fn dispatch(&self, call: &RentalCall) -> Result {
        match *call {
            RentalCall::Add {
                id,
                movie_id,
                client_id,
                rented,
                due,
            } => self.add_rental(id, movie_id, client_id, rented, due),
            RentalCall::Delete { id } => self.delete_rental(id).map(drop),
            RentalCall::Return { id, date } => self.return_movie(id, date),
            RentalCall::CancelReturn { id } => self.cancel_return(id),
        }
    }
}

/// A deferred call: the target service, and the selector with its arguments.
///
/// The arguments are captured when the action is built and never change.
/// Invoking the action runs the same mutation on the target every time, so the
/// outcome only depends on the state of the repositories.
#[derive(Clone)]
pub enum ReversibleAction {
    /// A call on a [`ClientService`].
    Client(Rc<ClientService>, ClientCall),
    /// A call on a [`MovieService`].
    Movie(Rc<MovieService>, MovieCall),
    /// A call on a [`RentalService`].
    Rental(Rc<RentalService>, RentalCall),
}

impl ReversibleAction {
    /// Returns the selector of the action.
    pub fn handler(&self) -> Handler {
        match self {
            ReversibleAction::Client(_, call) => call.handler(),
            ReversibleAction::Movie(_, call) => call.handler(),
            ReversibleAction::Rental(_, call) => call.handler(),
        }
    }
}

impl Invoke for ReversibleAction {
    fn invoke(&self) -> Result {
        match self {
            ReversibleAction::Client(target, call) => target.dispatch(call),
            ReversibleAction::Movie(target, call) => target.dispatch(call),
            ReversibleAction::Rental(target, call) => target.dispatch(call),
        }
    }
}

impl PartialEq for ReversibleAction {
    /// Two actions are equal if they call the same service instance with the same arguments.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ReversibleAction::Client(a, x), ReversibleAction::Client(b, y)) => {
                Rc::ptr_eq(a, b) && x == y
            }
            (ReversibleAction::Movie(a, x), ReversibleAction::Movie(b, y)) => {
                Rc::ptr_eq(a, b) && x == y
            }
            (ReversibleAction::Rental(a, x), ReversibleAction::Rental(b, y)) => {
                Rc::ptr_eq(a, b) && x == y
            }
            _ => false,
        }
    }
}

impl fmt::Debug for ReversibleAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut debug = f.debug_struct("ReversibleAction");
        debug.field("handler", &self.handler());
        match self {
            ReversibleAction::Client(_, call) => debug.field("arguments", call),
            ReversibleAction::Movie(_, call) => debug.field("arguments", call),
            ReversibleAction::Rental(_, call) => debug.field("arguments", call),
        };
        debug.finish()
    }
}

impl fmt::Display for ReversibleAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReversibleAction::Client(_, call) => fmt::Display::fmt(call, f),
            ReversibleAction::Movie(_, call) => fmt::Display::fmt(call, f),
            ReversibleAction::Rental(_, call) => fmt::Display::fmt(call, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixture::{date, fixture, Fixture};
    use crate::{Error, Repository};

    struct Services {
        clients: Rc<ClientService>,
        movies: Rc<MovieService>,
        rentals: Rc<RentalService>,
    }

    fn services(fx: &Fixture) -> Services {
        Services {
            clients: Rc::new(ClientService::new(fx.clients.clone(), fx.rentals.clone())),
            movies: Rc::new(MovieService::new(fx.movies.clone(), fx.rentals.clone())),
            rentals: Rc::new(RentalService::new(
                fx.clients.clone(),
                fx.movies.clone(),
                fx.rentals.clone(),
            )),
        }
    }

    #[test]
    fn client_calls() {
        let fx = fixture();
        let s = services(&fx);
        let remove = ReversibleAction::Client(s.clients.clone(), ClientCall::Remove { id: 1 });
        assert_eq!(remove.handler(), Handler::RemoveClient);
        remove.invoke().unwrap();
        assert_eq!(fx.clients.borrow().len(), 2);

        let add = ReversibleAction::Client(
            s.clients.clone(),
            ClientCall::Add {
                id: 4,
                name: "n4".into(),
            },
        );
        add.invoke().unwrap();
        assert_eq!(fx.clients.borrow().len(), 3);

        let update = ReversibleAction::Client(
            s.clients.clone(),
            ClientCall::Update {
                id: 4,
                name: "new_name".into(),
            },
        );
        update.invoke().unwrap();
        assert_eq!(fx.clients.borrow().get(4).unwrap().name, "new_name");
    }

    #[test]
    fn client_and_rentals_call() {
        let fx = fixture();
        let s = services(&fx);
        let rental = Rental::new(4, 1, 4, date(2020, 7, 23), date(2020, 8, 23));
        let action = ReversibleAction::Client(
            s.clients,
            ClientCall::AddWithRentals {
                id: 4,
                name: "n4".into(),
                rentals: vec![rental],
            },
        );
        assert_eq!(action.handler(), Handler::AddClientAndRentals);
        action.invoke().unwrap();
        assert_eq!(fx.clients.borrow().len(), 4);
        assert_eq!(fx.rentals.borrow().len(), 4);
    }

    #[test]
    fn movie_calls() {
        let fx = fixture();
        let s = services(&fx);
        ReversibleAction::Movie(s.movies.clone(), MovieCall::Remove { id: 1 })
            .invoke()
            .unwrap();
        assert_eq!(fx.movies.borrow().len(), 3);
        ReversibleAction::Movie(
            s.movies.clone(),
            MovieCall::Update {
                id: 2,
                title: "new_title".into(),
                description: "new_desc".into(),
                genre: "new_genre".into(),
            },
        )
        .invoke()
        .unwrap();
        assert_eq!(fx.movies.borrow().get(2).unwrap().genre, "new_genre");
        let rental = Rental::new(4, 5, 1, date(2020, 7, 23), date(2020, 8, 23));
        ReversibleAction::Movie(
            s.movies,
            MovieCall::AddWithRentals {
                id: 5,
                title: "t5".into(),
                description: "d5".into(),
                genre: "g5".into(),
                rentals: vec![rental],
            },
        )
        .invoke()
        .unwrap();
        assert_eq!(fx.movies.borrow().len(), 4);
        assert!(fx.rentals.borrow().contains(4));
    }

    #[test]
    fn rental_calls() {
        let fx = fixture();
        let s = services(&fx);
        let invoke = |call| ReversibleAction::Rental(s.rentals.clone(), call).invoke();

        invoke(RentalCall::Delete { id: 1 }).unwrap();
        assert_eq!(fx.rentals.borrow().len(), 2);
        invoke(RentalCall::CancelReturn { id: 2 }).unwrap();
        assert_eq!(fx.rentals.borrow().get(2).unwrap().returned_date, None);
        invoke(RentalCall::Add {
            id: 4,
            movie_id: 1,
            client_id: 1,
            rented: date(2020, 3, 24),
            due: date(2020, 4, 20),
        })
        .unwrap();
        assert_eq!(fx.rentals.borrow().len(), 3);
        invoke(RentalCall::Return {
            id: 4,
            date: date(2020, 11, 30),
        })
        .unwrap();
        assert_eq!(
            fx.rentals.borrow().get(4).unwrap().returned_date,
            Some(date(2020, 11, 30))
        );
    }

    #[test]
    fn errors_pass_through() {
        let fx = fixture();
        let s = services(&fx);
        let action = ReversibleAction::Rental(s.rentals, RentalCall::CancelReturn { id: 1 });
        assert_eq!(action.invoke(), Err(Error::NotReturned(1)));
    }

    #[test]
    fn equality_uses_target_identity() {
        let fx = fixture();
        let a = services(&fx);
        let b = services(&fx);
        let call = ClientCall::Remove { id: 1 };
        let x = ReversibleAction::Client(a.clients.clone(), call.clone());
        assert_eq!(x, ReversibleAction::Client(a.clients, call.clone()));
        assert_ne!(x, ReversibleAction::Client(b.clients, call));
    }

    #[test]
    fn display() {
        let fx = fixture();
        let s = services(&fx);
        let action = ReversibleAction::Client(
            s.clients,
            ClientCall::Add {
                id: 1,
                name: "A".into(),
            },
        );
        assert_eq!(action.to_string(), "add client #1 `A`");
        assert_eq!(
            format!("{:?}", action),
            "ReversibleAction { handler: AddClient, arguments: Add { id: 1, name: \"A\" } }"
        );
    }
}
