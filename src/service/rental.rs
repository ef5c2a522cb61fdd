use crate::{Client, Error, Movie, Rental, Repository, Result, Shared};
use chrono::NaiveDate;
use core::fmt;
use std::collections::BTreeMap;

/// Number of days a movie has been rented.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MovieRentedDays {
    /// Id of the movie.
    pub movie_id: u32,
    /// Title of the movie.
    pub movie_title: String,
    /// Days rented over all of its rentals.
    pub days: i64,
}

impl fmt::Display for MovieRentedDays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Movie ID: {}", self.movie_id)?;
        writeln!(f, "Title: {}", self.movie_title)?;
        write!(f, "Days rented: {}", self.days)
    }
}

/// Number of days a client has had movies rented.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientRentedDays {
    /// Id of the client.
    pub client_id: u32,
    /// Name of the client.
    pub client_name: String,
    /// Days rented over all of its rentals.
    pub days: i64,
}

impl fmt::Display for ClientRentedDays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Client ID: {}", self.client_id)?;
        writeln!(f, "Name: {}", self.client_name)?;
        write!(f, "Movie rental days: {}", self.days)
    }
}

/// Number of days a rental is past its due date.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RentalOverdueDays {
    /// Id of the rental.
    pub rental_id: u32,
    /// Title of the rented movie.
    pub movie_title: String,
    /// Days past the due date, negative while the rental is not due yet.
    pub days: i64,
}

impl fmt::Display for RentalOverdueDays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Rental ID: {}", self.rental_id)?;
        writeln!(f, "Movie title: {}", self.movie_title)?;
        write!(f, "Overdue days: {}", self.days)
    }
}

/// Rents and returns movies, and reports on the rentals.
pub struct RentalService {
    clients: Shared<dyn Repository<Client>>,
    movies: Shared<dyn Repository<Movie>>,
    rentals: Shared<dyn Repository<Rental>>,
}

impl RentalService {
    /// Returns a new service over the three repositories.
    pub fn new(
        clients: Shared<dyn Repository<Client>>,
        movies: Shared<dyn Repository<Movie>>,
        rentals: Shared<dyn Repository<Rental>>,
    ) -> RentalService {
        RentalService {
            clients,
            movies,
            rentals,
        }
    }

    /// Returns all rentals sorted by id.
    pub fn list(&self) -> Vec<Rental> {
        self.rentals.borrow().all()
    }

    /// Returns the rental with the id.
    pub fn get(&self, id: u32) -> Result<Rental> {
        self.rentals.borrow().get(id).cloned()
    }

    /// Returns the name of the client with the id.
    pub fn client_name(&self, client_id: u32) -> Result<String> {
        Ok(self.clients.borrow().get(client_id)?.name.clone())
    }

    /// Returns the title of the movie with the id.
    pub fn movie_title(&self, movie_id: u32) -> Result<String> {
        Ok(self.movies.borrow().get(movie_id)?.title.clone())
    }

    /// Returns the rentals of an existing client.
    pub fn rentals_from_client(&self, client_id: u32) -> Result<Vec<Rental>> {
        self.clients.borrow().get(client_id)?;
        Ok(self.filter(|rental| rental.client_id == client_id))
    }

    /// Returns the rentals of an existing movie.
    pub fn rentals_for_movie(&self, movie_id: u32) -> Result<Vec<Rental>> {
        self.movies.borrow().get(movie_id)?;
        Ok(self.filter(|rental| rental.movie_id == movie_id))
    }

    fn filter(&self, f: impl Fn(&Rental) -> bool) -> Vec<Rental> {
        self.rentals
            .borrow()
            .all()
            .into_iter()
            .filter(|rental| f(rental))
            .collect()
    }

    /// Returns `true` if the client kept a movie past its due date,
    /// seen from `date`.
    pub fn has_late_returns(&self, client_id: u32, date: NaiveDate) -> Result<bool> {
        let late = self
            .rentals_from_client(client_id)?
            .iter()
            .any(|rental| match rental.returned_date {
                Some(returned) => rental.due_date < returned && rental.due_date < date,
                None => rental.due_date < date,
            });
        Ok(late)
    }

    /// Returns `true` if no rental of the movie overlaps `from` to `due`.
    pub fn is_movie_available(
        &self,
        movie_id: u32,
        from: NaiveDate,
        due: NaiveDate,
    ) -> Result<bool> {
        let taken = self
            .rentals_for_movie(movie_id)?
            .iter()
            .any(|rental| match rental.returned_date {
                None => rental.rented_date < from,
                Some(returned) => returned > from && rental.rented_date < due,
            });
        Ok(!taken)
    }

    /// Rents a movie to a client.
    ///
    /// # Errors
    /// Fails if the client or movie do not exist, if the client has late
    /// returns at `rented`, or if the movie is not available.
    pub fn add_rental(
        &self,
        id: u32,
        movie_id: u32,
        client_id: u32,
        rented: NaiveDate,
        due: NaiveDate,
    ) -> Result {
        if self.has_late_returns(client_id, rented)? {
            return Err(Error::LateClient(client_id));
        }
        if !self.is_movie_available(movie_id, rented, due)? {
            return Err(Error::MovieUnavailable(movie_id));
        }
        self.rentals
            .borrow_mut()
            .add(Rental::new(id, movie_id, client_id, rented, due))
    }

    /// Deletes a rental and returns it.
    pub fn delete_rental(&self, id: u32) -> Result<Rental> {
        self.rentals.borrow_mut().remove(id)
    }

    /// Marks the rental as returned on `date`.
    pub fn return_movie(&self, id: u32, date: NaiveDate) -> Result {
        let rental = self.get(id)?;
        if rental.is_returned() {
            return Err(Error::AlreadyReturned(id));
        }
        self.rentals.borrow_mut().update(rental.returned(date))?;
        Ok(())
    }

    /// Clears the return date of a returned rental.
    pub fn cancel_return(&self, id: u32) -> Result {
        let mut rental = self.get(id)?;
        if rental.returned_date.take().is_none() {
            return Err(Error::NotReturned(id));
        }
        self.rentals.borrow_mut().update(rental)?;
        Ok(())
    }

    /// Movies ordered by the number of days they have been rented, most first.
    pub fn most_rented_movies(&self, today: NaiveDate) -> Result<Vec<MovieRentedDays>> {
        let mut movies = Vec::new();
        for (movie_id, days) in self.days_by(today, |rental| rental.movie_id) {
            movies.push(MovieRentedDays {
                movie_id,
                movie_title: self.movie_title(movie_id)?,
                days,
            });
        }
        movies.sort_by(|a, b| b.days.cmp(&a.days));
        Ok(movies)
    }

    /// Clients ordered by the number of days they have had movies rented, most first.
    pub fn most_active_clients(&self, today: NaiveDate) -> Result<Vec<ClientRentedDays>> {
        let mut clients = Vec::new();
        for (client_id, days) in self.days_by(today, |rental| rental.client_id) {
            clients.push(ClientRentedDays {
                client_id,
                client_name: self.client_name(client_id)?,
                days,
            });
        }
        clients.sort_by(|a, b| b.days.cmp(&a.days));
        Ok(clients)
    }

    /// Unreturned rentals, most overdue first.
    ///
    /// Rentals that are not due yet are listed too, with zero or negative days.
    pub fn late_rentals(&self, today: NaiveDate) -> Result<Vec<RentalOverdueDays>> {
        let mut late = Vec::new();
        for rental in self.filter(|rental| !rental.is_returned()) {
            late.push(RentalOverdueDays {
                rental_id: rental.id,
                movie_title: self.movie_title(rental.movie_id)?,
                days: (today - rental.due_date).num_days(),
            });
        }
        late.sort_by(|a, b| b.days.cmp(&a.days));
        Ok(late)
    }

    // Keyed by id so ties keep ascending id order after the stable sort.
    fn days_by(&self, today: NaiveDate, key: impl Fn(&Rental) -> u32) -> BTreeMap<u32, i64> {
        let mut days = BTreeMap::new();
        for rental in self.rentals.borrow().all() {
            *days.entry(key(&rental)).or_insert(0) += rental.rented_days(today);
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixture::{date, fixture, Fixture};
    use crate::EntityKind;

    fn service(fx: &Fixture) -> RentalService {
        RentalService::new(fx.clients.clone(), fx.movies.clone(), fx.rentals.clone())
    }

    #[test]
    fn rentals_from_client() {
        let fx = fixture();
        let service = service(&fx);
        assert_eq!(
            service.rentals_from_client(0),
            Err(Error::not_found(EntityKind::Client, 0))
        );
        assert_eq!(service.rentals_from_client(1).unwrap().len(), 1);
        assert_eq!(service.rentals_from_client(2).unwrap().len(), 2);
        assert!(service.rentals_from_client(3).unwrap().is_empty());
        assert_eq!(service.rentals_for_movie(1).unwrap().len(), 2);
        assert!(service.rentals_for_movie(0).is_err());
    }

    #[test]
    fn late_returns() {
        let fx = fixture();
        let service = service(&fx);
        assert!(service.has_late_returns(1, date(2020, 11, 24)).unwrap());
        assert!(service.has_late_returns(2, date(2020, 11, 24)).unwrap());
        assert!(!service.has_late_returns(1, date(2020, 6, 23)).unwrap());
        assert!(!service.has_late_returns(3, date(2020, 11, 24)).unwrap());
        assert!(!service.has_late_returns(2, date(2020, 6, 24)).unwrap());
    }

    #[test]
    fn availability() {
        let fx = fixture();
        let service = service(&fx);
        let (d1, d2, d3) = (date(2020, 8, 24), date(2020, 8, 23), date(2020, 7, 23));
        assert!(!service.is_movie_available(1, d2, d1).unwrap());
        assert!(!service.is_movie_available(2, d3, d1).unwrap());
        assert!(service.is_movie_available(3, d3, d2).unwrap());
    }

    #[test]
    fn add_rental() {
        let fx = fixture();
        let service = service(&fx);
        assert_eq!(
            service.add_rental(4, 2, 1, date(2020, 8, 23), date(2020, 9, 23)),
            Err(Error::LateClient(1))
        );
        assert_eq!(
            service.add_rental(4, 1, 3, date(2020, 8, 23), date(2020, 9, 23)),
            Err(Error::MovieUnavailable(1))
        );
        service
            .add_rental(4, 3, 3, date(2020, 4, 23), date(2020, 5, 23))
            .unwrap();
        assert_eq!(service.list().len(), 4);
    }

    #[test]
    fn delete_rental() {
        let fx = fixture();
        let service = service(&fx);
        assert_eq!(service.delete_rental(1).unwrap().id, 1);
        assert_eq!(service.list().len(), 2);
        assert!(service.delete_rental(1).is_err());
    }

    #[test]
    fn return_movie() {
        let fx = fixture();
        let service = service(&fx);
        assert!(service.return_movie(4, date(2020, 5, 7)).is_err());
        assert_eq!(
            service.return_movie(2, date(2020, 5, 12)),
            Err(Error::AlreadyReturned(2))
        );
        assert!(matches!(
            service.return_movie(1, date(2020, 5, 22)),
            Err(Error::Invalid { .. })
        ));
        assert_eq!(service.get(1).unwrap().returned_date, None);
        service.return_movie(1, date(2020, 8, 23)).unwrap();
        assert_eq!(service.get(1).unwrap().returned_date, Some(date(2020, 8, 23)));
    }

    #[test]
    fn cancel_return() {
        let fx = fixture();
        let service = service(&fx);
        assert!(service.cancel_return(4).is_err());
        assert_eq!(service.cancel_return(1), Err(Error::NotReturned(1)));
        service.cancel_return(2).unwrap();
        assert_eq!(service.get(2).unwrap().returned_date, None);
    }

    #[test]
    fn late_rentals_include_rentals_not_due_yet() {
        let fx = fixture();
        let service = service(&fx);
        service.delete_rental(1).unwrap();
        service
            .add_rental(4, 3, 3, date(2020, 1, 1), date(2020, 1, 30))
            .unwrap();
        service
            .add_rental(5, 4, 1, date(2020, 1, 1), date(2020, 1, 5))
            .unwrap();
        let late = service.late_rentals(date(2020, 1, 10)).unwrap();
        assert_eq!(late.len(), 2);
        assert_eq!((late[0].rental_id, late[0].days), (5, 5));
        assert_eq!((late[1].rental_id, late[1].days), (4, -20));
        assert_eq!(late[1].movie_title, "t3");
    }

    #[test]
    fn reports() {
        let fx = fixture();
        let service = service(&fx);
        let today = date(2020, 9, 1);

        let movies = service.most_rented_movies(today).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_title, "t1");
        assert_eq!(movies[0].days, 101 + 4);
        assert_eq!(movies[1].movie_title, "t2");
        assert_eq!(movies[1].days, 92);

        let clients = service.most_active_clients(today).unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].client_name, "n1");
        assert_eq!(clients[1].client_name, "n2");
        assert_eq!(clients[1].days, 96);

        let late = service.late_rentals(today).unwrap();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].movie_title, "t1");
        assert_eq!(late[0].days, 40);

        let early = service.late_rentals(date(2020, 7, 1)).unwrap();
        assert_eq!(early.len(), 1);
        assert_eq!(early[0].rental_id, 1);
        assert_eq!(early[0].days, -22);
    }
}
