use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A specialized Result type for shop and undo-redo operations.
pub type Result<T = ()> = core::result::Result<T, Error>;

/// The kinds of entities kept by the shop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum EntityKind {
    /// A [`Client`](crate::Client).
    Client,
    /// A [`Movie`](crate::Movie).
    Movie,
    /// A [`Rental`](crate::Rental).
    Rental,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Client => "client",
            EntityKind::Movie => "movie",
            EntityKind::Rental => "rental",
        })
    }
}

/// Errors raised by the operation manager and the domain services.
///
/// Errors coming from the services pass through [`undo`] and [`redo`] unchanged.
///
/// [`undo`]: crate::OperationManager::undo
/// [`redo`]: crate::OperationManager::redo
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The cursor is before the first operation.
    #[error("no more undo operations are possible")]
    UndoUnavailable,
    /// The cursor is at the last operation.
    #[error("no more redo operations are possible")]
    RedoUnavailable,
    /// The entity failed validation.
    #[error("invalid {kind}: {reason}")]
    Invalid {
        /// Kind of the rejected entity.
        kind: EntityKind,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// An entity with the same id is already stored.
    #[error("{kind} {id} already exists")]
    Duplicate {
        /// Kind of the entity.
        kind: EntityKind,
        /// The conflicting id.
        id: u32,
    },
    /// No entity with the id is stored.
    #[error("{kind} {id} does not exist")]
    NotFound {
        /// Kind of the entity.
        kind: EntityKind,
        /// The missing id.
        id: u32,
    },
    /// The client returned a movie late and can not rent anymore.
    #[error("client {0} has late returns and can not rent movies")]
    LateClient(u32),
    /// The movie is rented during the requested interval.
    #[error("movie {0} is not available")]
    MovieUnavailable(u32),
    /// The rental already has a return date.
    #[error("rental {0} has already been returned")]
    AlreadyReturned(u32),
    /// The rental has no return date to cancel.
    #[error("rental {0} has not been returned")]
    NotReturned(u32),
    /// The field name does not exist on the entity.
    #[error("{kind} has no field `{field}`")]
    UnknownField {
        /// Kind of the searched entity.
        kind: EntityKind,
        /// The requested field name.
        field: String,
    },
}

impl Error {
    /// Returns `true` if the error only says that the manager is at a boundary
    /// of its history.
    ///
    /// Front ends use this to show an informational message instead of an error.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::UndoUnavailable | Error::RedoUnavailable)
    }

    pub(crate) fn not_found(kind: EntityKind, id: u32) -> Error {
        Error::NotFound { kind, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::not_found(EntityKind::Client, 7).to_string(),
            "client 7 does not exist"
        );
        assert_eq!(
            Error::UndoUnavailable.to_string(),
            "no more undo operations are possible"
        );
        assert!(Error::RedoUnavailable.is_unavailable());
        assert!(!Error::LateClient(1).is_unavailable());
    }
}
