//! The entities kept by the shop.

use crate::{EntityKind, Error, Result};
use chrono::NaiveDate;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An entity that can be stored in a [`Repository`](crate::Repository).
pub trait Entity: Clone {
    /// The kind reported in errors about this entity.
    const KIND: EntityKind;

    /// Returns the id of the entity.
    fn id(&self) -> u32;

    /// Checks that the entity is valid.
    ///
    /// # Errors
    /// Returns [`Error::Invalid`] describing the first broken rule.
    fn validate(&self) -> Result;
}

fn invalid(kind: EntityKind, reason: &'static str) -> Error {
    Error::Invalid { kind, reason }
}

/// A client of the shop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Client {
    /// Unique, positive id.
    pub id: u32,
    /// Full name.
    pub name: String,
}

impl Client {
    /// Returns a new client.
    pub fn new(id: u32, name: impl Into<String>) -> Client {
        Client {
            id,
            name: name.into(),
        }
    }
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> u32 {
        self.id
    }

    fn validate(&self) -> Result {
        if self.id < 1 {
            return Err(invalid(Self::KIND, "the id must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "---------- ID: {} ----------", self.id)?;
        write!(f, "Name: {}", self.name)
    }
}

/// A movie that can be rented.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Movie {
    /// Unique, positive id.
    pub id: u32,
    /// Title.
    pub title: String,
    /// Short plot description.
    pub description: String,
    /// Genre.
    pub genre: String,
}

impl Movie {
    /// Returns a new movie.
    pub fn new(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        genre: impl Into<String>,
    ) -> Movie {
        Movie {
            id,
            title: title.into(),
            description: description.into(),
            genre: genre.into(),
        }
    }
}

impl Entity for Movie {
    const KIND: EntityKind = EntityKind::Movie;

    fn id(&self) -> u32 {
        self.id
    }

    fn validate(&self) -> Result {
        if self.id < 1 {
            return Err(invalid(Self::KIND, "the id must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "---------- ID: {} ----------", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Genre: {}", self.genre)
    }
}

/// A movie rented by a client.
///
/// `returned_date` is `None` while the movie is still rented.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Rental {
    /// Unique, positive id.
    pub id: u32,
    /// Id of the rented movie.
    pub movie_id: u32,
    /// Id of the renting client.
    pub client_id: u32,
    /// Day the movie was rented.
    pub rented_date: NaiveDate,
    /// Day the movie should be back.
    pub due_date: NaiveDate,
    /// Day the movie was brought back.
    pub returned_date: Option<NaiveDate>,
}

impl Rental {
    /// Returns a new rental that has not been returned yet.
    pub fn new(
        id: u32,
        movie_id: u32,
        client_id: u32,
        rented_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Rental {
        Rental {
            id,
            movie_id,
            client_id,
            rented_date,
            due_date,
            returned_date: None,
        }
    }

    /// Sets the return date.
    pub fn returned(mut self, date: NaiveDate) -> Rental {
        self.returned_date = Some(date);
        self
    }

    /// Returns `true` if the movie has been brought back.
    pub fn is_returned(&self) -> bool {
        self.returned_date.is_some()
    }

    /// Number of days the movie was kept, counting to `today` if it is still rented.
    pub fn rented_days(&self, today: NaiveDate) -> i64 {
        let end = self.returned_date.unwrap_or(today);
        (end - self.rented_date).num_days()
    }
}

impl Entity for Rental {
    const KIND: EntityKind = EntityKind::Rental;

    fn id(&self) -> u32 {
        self.id
    }

    fn validate(&self) -> Result {
        if self.id < 1 {
            return Err(invalid(Self::KIND, "the id must be positive"));
        }
        if self.movie_id < 1 {
            return Err(invalid(Self::KIND, "the movie id must be positive"));
        }
        if self.client_id < 1 {
            return Err(invalid(Self::KIND, "the client id must be positive"));
        }
        if self.rented_date > self.due_date {
            return Err(invalid(
                Self::KIND,
                "the rental date can not be after the due date",
            ));
        }
        if matches!(self.returned_date, Some(returned) if returned < self.rented_date) {
            return Err(invalid(
                Self::KIND,
                "the rental date can not be after the returned date",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "---------- ID: {} ----------", self.id)?;
        writeln!(f, "Movie ID: {}", self.movie_id)?;
        writeln!(f, "Client ID: {}", self.client_id)?;
        writeln!(f, "Rented Date: {}", self.rented_date)?;
        writeln!(f, "Due Date: {}", self.due_date)?;
        match self.returned_date {
            Some(date) => write!(f, "Returned Date: {}", date),
            None => f.write_str("Returned Date: Not Returned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn client_validation() {
        assert!(Client::new(1, "a").validate().is_ok());
        assert_eq!(
            Client::new(0, "a").validate(),
            Err(invalid(EntityKind::Client, "the id must be positive"))
        );
    }

    #[test]
    fn movie_validation() {
        assert!(Movie::new(3, "t", "d", "g").validate().is_ok());
        assert!(Movie::new(0, "t", "d", "g").validate().is_err());
    }

    #[test]
    fn rental_validation() {
        let ok = Rental::new(1, 1, 1, date(2020, 5, 23), date(2020, 7, 23));
        assert!(ok.validate().is_ok());
        assert!(ok.clone().returned(date(2020, 5, 23)).validate().is_ok());
        assert!(ok.clone().returned(date(2020, 5, 22)).validate().is_err());
        let backwards = Rental::new(1, 1, 1, date(2020, 7, 24), date(2020, 7, 23));
        assert!(backwards.validate().is_err());
        assert!(Rental::new(1, 0, 1, date(2020, 1, 1), date(2020, 1, 2))
            .validate()
            .is_err());
        assert!(Rental::new(1, 1, 0, date(2020, 1, 1), date(2020, 1, 2))
            .validate()
            .is_err());
    }

    #[test]
    fn rented_days() {
        let rental = Rental::new(2, 2, 2, date(2020, 5, 23), date(2020, 7, 23));
        assert_eq!(rental.rented_days(date(2020, 5, 30)), 7);
        let rental = rental.returned(date(2020, 8, 23));
        assert_eq!(rental.rented_days(date(2021, 1, 1)), 92);
    }

    #[test]
    fn display() {
        let rental = Rental::new(5, 1, 1, date(2020, 5, 23), date(2020, 7, 23));
        assert!(rental.to_string().ends_with("Returned Date: Not Returned"));
        assert_eq!(Client::new(1, "A").to_string(), "---------- ID: 1 ----------\nName: A");
    }
}
