//! The undoable front of the rental shop.

use crate::{
    shared, Client, ClientCall, ClientService, MemoryRepository, Movie, MovieCall, MovieService,
    OperationKind, OperationManager, OperationRecord, Rental, RentalCall, RentalService,
    Repository, Result, ReversibleAction, Shared, Slot,
};
use chrono::NaiveDate;
use std::rc::Rc;

/// Performs the shop mutations and records how to undo them.
///
/// Each mutator calls the matching service. When the call succeeds the
/// inverse and forward actions are recorded in the manager. A failed call
/// records nothing.
///
/// # Examples
/// ```
/// # use rental_undo::Shop;
/// let mut shop = Shop::in_memory();
/// shop.add_client(1, "Ann").unwrap();
/// shop.update_client(1, "Anna").unwrap();
/// assert_eq!(shop.clients().get(1).unwrap().name, "Anna");
/// shop.undo().unwrap();
/// assert_eq!(shop.clients().get(1).unwrap().name, "Ann");
/// shop.redo().unwrap();
/// assert_eq!(shop.clients().get(1).unwrap().name, "Anna");
/// ```
pub struct Shop<S = ()> {
    clients: Rc<ClientService>,
    movies: Rc<MovieService>,
    rentals: Rc<RentalService>,
    manager: OperationManager<ReversibleAction, S>,
}

impl Shop {
    /// Returns an empty shop backed by memory repositories.
    pub fn in_memory() -> Shop {
        Shop::in_memory_with(OperationManager::new())
    }
}

impl<S> Shop<S> {
    /// Returns an empty shop backed by memory repositories that records into `manager`.
    pub fn in_memory_with(manager: OperationManager<ReversibleAction, S>) -> Shop<S> {
        Shop::new(
            shared(MemoryRepository::<Client>::new()),
            shared(MemoryRepository::<Movie>::new()),
            shared(MemoryRepository::<Rental>::new()),
            manager,
        )
    }

    /// Returns a shop over the repositories that records into `manager`.
    pub fn new(
        clients: Shared<dyn Repository<Client>>,
        movies: Shared<dyn Repository<Movie>>,
        rentals: Shared<dyn Repository<Rental>>,
        manager: OperationManager<ReversibleAction, S>,
    ) -> Shop<S> {
        Shop {
            clients: Rc::new(ClientService::new(clients.clone(), rentals.clone())),
            movies: Rc::new(MovieService::new(movies.clone(), rentals.clone())),
            rentals: Rc::new(RentalService::new(clients, movies, rentals)),
            manager,
        }
    }

    /// Returns the client service.
    pub fn clients(&self) -> &ClientService {
        &self.clients
    }

    /// Returns the movie service.
    pub fn movies(&self) -> &MovieService {
        &self.movies
    }

    /// Returns the rental service.
    pub fn rentals(&self) -> &RentalService {
        &self.rentals
    }

    /// Returns the operation manager.
    pub fn manager(&self) -> &OperationManager<ReversibleAction, S> {
        &self.manager
    }

    /// Returns the operation manager.
    pub fn manager_mut(&mut self) -> &mut OperationManager<ReversibleAction, S> {
        &mut self.manager
    }

    fn client(&self, call: ClientCall) -> ReversibleAction {
        ReversibleAction::Client(self.clients.clone(), call)
    }

    fn movie(&self, call: MovieCall) -> ReversibleAction {
        ReversibleAction::Movie(self.movies.clone(), call)
    }

    fn rental(&self, call: RentalCall) -> ReversibleAction {
        ReversibleAction::Rental(self.rentals.clone(), call)
    }
}

impl<S: Slot> Shop<S> {
    fn record(&mut self, kind: OperationKind, undo: ReversibleAction, redo: ReversibleAction) {
        debug_assert_eq!(undo.handler(), kind.undo_handler());
        debug_assert_eq!(redo.handler(), kind.redo_handler());
        self.manager
            .record_operation(OperationRecord::new(undo, redo));
    }

    /// Adds a client.
    pub fn add_client(&mut self, id: u32, name: &str) -> Result {
        self.clients.add(id, name)?;
        let undo = self.client(ClientCall::Remove { id });
        let redo = self.client(ClientCall::Add {
            id,
            name: name.to_string(),
        });
        self.record(OperationKind::AddClient, undo, redo);
        Ok(())
    }

    /// Removes a client together with its rentals.
    pub fn remove_client(&mut self, id: u32) -> Result {
        let removed = self.clients.remove(id)?;
        let undo = self.client(ClientCall::AddWithRentals {
            id,
            name: removed.client.name,
            rentals: removed.rentals,
        });
        let redo = self.client(ClientCall::Remove { id });
        self.record(OperationKind::RemoveClient, undo, redo);
        Ok(())
    }

    /// Renames a client.
    pub fn update_client(&mut self, id: u32, name: &str) -> Result {
        let old = self.clients.update(id, name)?;
        let undo = self.client(ClientCall::Update { id, name: old.name });
        let redo = self.client(ClientCall::Update {
            id,
            name: name.to_string(),
        });
        self.record(OperationKind::UpdateClient, undo, redo);
        Ok(())
    }

    /// Adds a movie.
    pub fn add_movie(&mut self, id: u32, title: &str, description: &str, genre: &str) -> Result {
        self.movies.add(id, title, description, genre)?;
        let undo = self.movie(MovieCall::Remove { id });
        let redo = self.movie(MovieCall::Add {
            id,
            title: title.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
        });
        self.record(OperationKind::AddMovie, undo, redo);
        Ok(())
    }

    /// Removes a movie together with its rentals.
    pub fn remove_movie(&mut self, id: u32) -> Result {
        let removed = self.movies.remove(id)?;
        let Movie {
            title,
            description,
            genre,
            ..
        } = removed.movie;
        let undo = self.movie(MovieCall::AddWithRentals {
            id,
            title,
            description,
            genre,
            rentals: removed.rentals,
        });
        let redo = self.movie(MovieCall::Remove { id });
        self.record(OperationKind::RemoveMovie, undo, redo);
        Ok(())
    }

    /// Replaces the attributes of a movie.
    pub fn update_movie(
        &mut self,
        id: u32,
        title: &str,
        description: &str,
        genre: &str,
    ) -> Result {
        let old = self.movies.update(id, title, description, genre)?;
        let undo = self.movie(MovieCall::Update {
            id,
            title: old.title,
            description: old.description,
            genre: old.genre,
        });
        let redo = self.movie(MovieCall::Update {
            id,
            title: title.to_string(),
            description: description.to_string(),
            genre: genre.to_string(),
        });
        self.record(OperationKind::UpdateMovie, undo, redo);
        Ok(())
    }

    /// Rents a movie to a client.
    pub fn rent_movie(
        &mut self,
        id: u32,
        movie_id: u32,
        client_id: u32,
        rented: NaiveDate,
        due: NaiveDate,
    ) -> Result {
        self.rentals
            .add_rental(id, movie_id, client_id, rented, due)?;
        let undo = self.rental(RentalCall::Delete { id });
        let redo = self.rental(RentalCall::Add {
            id,
            movie_id,
            client_id,
            rented,
            due,
        });
        self.record(OperationKind::RentMovie, undo, redo);
        Ok(())
    }

    /// Marks a rental as returned on `date`.
    pub fn return_movie(&mut self, id: u32, date: NaiveDate) -> Result {
        self.rentals.return_movie(id, date)?;
        let undo = self.rental(RentalCall::CancelReturn { id });
        let redo = self.rental(RentalCall::Return { id, date });
        self.record(OperationKind::ReturnMovie, undo, redo);
        Ok(())
    }

    /// Undoes the last applied operation.
    pub fn undo(&mut self) -> Result {
        self.manager.undo()
    }

    /// Redoes the last undone operation.
    pub fn redo(&mut self) -> Result {
        self.manager.redo()
    }
}
