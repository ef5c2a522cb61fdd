use super::contains_ignore_case;
use crate::{EntityKind, Error, Movie, Rental, Repository, Result, Shared};
use core::str::FromStr;

/// A movie removed together with its rentals.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RemovedMovie {
    /// The removed movie.
    pub movie: Movie,
    /// The rentals removed with the movie, sorted by id.
    pub rentals: Vec<Rental>,
}

/// Fields of a movie that can be searched.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MovieField {
    /// The id.
    Id,
    /// The title.
    Title,
    /// The description.
    Description,
    /// The genre.
    Genre,
}

impl MovieField {
    /// All searchable fields.
    pub const ALL: [MovieField; 4] = [
        MovieField::Id,
        MovieField::Title,
        MovieField::Description,
        MovieField::Genre,
    ];

    fn text(self, movie: &Movie) -> String {
        match self {
            MovieField::Id => movie.id.to_string(),
            MovieField::Title => movie.title.clone(),
            MovieField::Description => movie.description.clone(),
            MovieField::Genre => movie.genre.clone(),
        }
    }
}

impl FromStr for MovieField {
    type Err = Error;

    fn from_str(s: &str) -> Result<MovieField> {
        match s {
            "id" => Ok(MovieField::Id),
            "title" => Ok(MovieField::Title),
            "description" => Ok(MovieField::Description),
            "genre" => Ok(MovieField::Genre),
            _ => Err(Error::UnknownField {
                kind: EntityKind::Movie,
                field: s.to_string(),
            }),
        }
    }
}

/// Adds, removes, updates and searches movies.
///
/// Removing a movie also removes its rentals.
pub struct MovieService {
    movies: Shared<dyn Repository<Movie>>,
    rentals: Shared<dyn Repository<Rental>>,
}

impl MovieService {
    /// Returns a new service over the two repositories.
    pub fn new(
        movies: Shared<dyn Repository<Movie>>,
        rentals: Shared<dyn Repository<Rental>>,
    ) -> MovieService {
        MovieService { movies, rentals }
    }

    /// Adds a new movie.
    pub fn add(&self, id: u32, title: &str, description: &str, genre: &str) -> Result {
        self.movies
            .borrow_mut()
            .add(Movie::new(id, title, description, genre))
    }

    /// Adds a movie and some of its rentals.
    ///
    /// The rentals are stored as given, without the renting rules.
    pub fn add_movie_and_rentals(
        &self,
        id: u32,
        title: &str,
        description: &str,
        genre: &str,
        rentals: &[Rental],
    ) -> Result {
        self.add(id, title, description, genre)?;
        let mut repository = self.rentals.borrow_mut();
        for rental in rentals {
            repository.add(rental.clone())?;
        }
        Ok(())
    }

    /// Removes a movie and all of its rentals.
    pub fn remove(&self, id: u32) -> Result<RemovedMovie> {
        let movie = self.movies.borrow_mut().remove(id)?;
        let rentals = self.rentals_for_movie(id);
        let mut repository = self.rentals.borrow_mut();
        for rental in &rentals {
            repository.remove(rental.id)?;
        }
        log::debug!("removed movie {} and {} rental(s)", id, rentals.len());
        Ok(RemovedMovie { movie, rentals })
    }

    /// Replaces the attributes of a movie and returns the movie as it was before.
    pub fn update(&self, id: u32, title: &str, description: &str, genre: &str) -> Result<Movie> {
        self.movies
            .borrow_mut()
            .update(Movie::new(id, title, description, genre))
    }

    /// Returns the movie with the id.
    pub fn get(&self, id: u32) -> Result<Movie> {
        self.movies.borrow().get(id).cloned()
    }

    /// Returns all movies sorted by id.
    pub fn list(&self) -> Vec<Movie> {
        self.movies.borrow().all()
    }

    /// Returns the rentals of a movie, whether the movie exists or not.
    pub fn rentals_for_movie(&self, id: u32) -> Vec<Rental> {
        self.rentals
            .borrow()
            .all()
            .into_iter()
            .filter(|rental| rental.movie_id == id)
            .collect()
    }

    /// Returns the movies whose `field` contains `query`, ignoring case.
    pub fn search(&self, query: &str, field: MovieField) -> Vec<Movie> {
        self.list()
            .into_iter()
            .filter(|movie| contains_ignore_case(&field.text(movie), query))
            .collect()
    }

    /// Returns the movies where any field contains `query`, ignoring case.
    pub fn search_all(&self, query: &str) -> Vec<Movie> {
        self.list()
            .into_iter()
            .filter(|movie| {
                MovieField::ALL
                    .iter()
                    .any(|field| contains_ignore_case(&field.text(movie), query))
            })
            .collect()
    }
}
