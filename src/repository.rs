//! Storage of the shop entities.

use crate::{Entity, Error, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// A repository shared between services.
pub type Shared<R> = Rc<RefCell<R>>;

/// Wraps `value` so it can be shared between services.
pub fn shared<R>(value: R) -> Shared<R> {
    Rc::new(RefCell::new(value))
}

/// Id keyed storage of entities.
///
/// Entities are kept sorted by id and validated before they are stored.
pub trait Repository<T: Entity> {
    /// Validates and stores `entity`.
    ///
    /// # Errors
    /// Returns [`Error::Invalid`] if validation fails and
    /// [`Error::Duplicate`] if the id is already taken.
    fn add(&mut self, entity: T) -> Result;

    /// Removes and returns the entity with the id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no entity has the id.
    fn remove(&mut self, id: u32) -> Result<T>;

    /// Validates `entity` and replaces the stored entity with the same id,
    /// returning the old one.
    ///
    /// # Errors
    /// Returns [`Error::Invalid`] if validation fails and
    /// [`Error::NotFound`] if no entity has the id.
    fn update(&mut self, entity: T) -> Result<T>;

    /// Returns the entity with the id.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no entity has the id.
    fn get(&self, id: u32) -> Result<&T>;

    /// Returns all entities sorted by id.
    fn all(&self) -> Vec<T>;

    /// Returns the number of stored entities.
    fn len(&self) -> usize;

    /// Returns `true` if the id is stored.
    fn contains(&self, id: u32) -> bool {
        self.get(id).is_ok()
    }

    /// Returns the stored ids in ascending order.
    fn ids(&self) -> Vec<u32> {
        self.all().iter().map(Entity::id).collect()
    }

    /// Returns `true` if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A repository that keeps its entities in memory.
#[derive(Clone, Debug)]
pub struct MemoryRepository<T> {
    entities: Vec<T>,
}

impl<T> MemoryRepository<T> {
    /// Returns an empty repository.
    pub fn new() -> MemoryRepository<T> {
        MemoryRepository {
            entities: Vec::new(),
        }
    }
}

impl<T: Entity> MemoryRepository<T> {
    fn position(&self, id: u32) -> core::result::Result<usize, usize> {
        self.entities.binary_search_by_key(&id, Entity::id)
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        MemoryRepository::new()
    }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
    fn add(&mut self, entity: T) -> Result {
        entity.validate()?;
        let id = entity.id();
        match self.position(id) {
            Ok(_) => Err(Error::Duplicate { kind: T::KIND, id }),
            Err(at) => {
                log::trace!("add {} {}", T::KIND, id);
                self.entities.insert(at, entity);
                Ok(())
            }
        }
    }

    fn remove(&mut self, id: u32) -> Result<T> {
        let at = self
            .position(id)
            .map_err(|_| Error::not_found(T::KIND, id))?;
        log::trace!("remove {} {}", T::KIND, id);
        Ok(self.entities.remove(at))
    }

    fn update(&mut self, entity: T) -> Result<T> {
        entity.validate()?;
        let id = entity.id();
        let at = self
            .position(id)
            .map_err(|_| Error::not_found(T::KIND, id))?;
        log::trace!("update {} {}", T::KIND, id);
        Ok(core::mem::replace(&mut self.entities[at], entity))
    }

    fn get(&self, id: u32) -> Result<&T> {
        self.position(id)
            .map(|at| &self.entities[at])
            .map_err(|_| Error::not_found(T::KIND, id))
    }

    fn all(&self) -> Vec<T> {
        self.entities.clone()
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn ids(&self) -> Vec<u32> {
        self.entities.iter().map(Entity::id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Client, EntityKind};

    fn repository() -> MemoryRepository<Client> {
        let mut repository = MemoryRepository::new();
        repository.add(Client::new(3, "c")).unwrap();
        repository.add(Client::new(1, "a")).unwrap();
        repository.add(Client::new(2, "b")).unwrap();
        repository
    }

    #[test]
    fn add_keeps_ids_sorted() {
        let repository = repository();
        assert_eq!(repository.ids(), [1, 2, 3]);
        assert_eq!(repository.len(), 3);
    }

    #[test]
    fn add_rejects_duplicates_and_invalid() {
        let mut repository = repository();
        assert_eq!(
            repository.add(Client::new(2, "x")),
            Err(Error::Duplicate {
                kind: EntityKind::Client,
                id: 2
            })
        );
        assert!(matches!(
            repository.add(Client::new(0, "x")),
            Err(Error::Invalid { .. })
        ));
        assert_eq!(repository.len(), 3);
    }

    #[test]
    fn remove() {
        let mut repository = repository();
        assert_eq!(repository.remove(2), Ok(Client::new(2, "b")));
        assert_eq!(repository.ids(), [1, 3]);
        assert_eq!(
            repository.remove(2),
            Err(Error::not_found(EntityKind::Client, 2))
        );
    }

    #[test]
    fn update() {
        let mut repository = repository();
        assert_eq!(
            repository.update(Client::new(1, "new")),
            Ok(Client::new(1, "a"))
        );
        assert_eq!(repository.get(1).unwrap().name, "new");
        assert!(repository.update(Client::new(9, "x")).is_err());
    }

    #[test]
    fn contains() {
        let mut repository = repository();
        assert!(repository.contains(3));
        assert!(!repository.contains(0));
        repository.remove(3).unwrap();
        assert!(!repository.contains(3));
        assert!(!repository.is_empty());
    }
}
