use crate::{Handler, ReversibleAction};
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The undo and redo actions of one user initiated change.
///
/// The record does not check that the two actions reverse each other.
/// Whoever builds it must guarantee that invoking `undo_action` right after
/// `redo_action`, or the other way around, gives back the exact prior state.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationRecord<A = ReversibleAction> {
    undo_action: A,
    redo_action: A,
}

impl<A> OperationRecord<A> {
    /// Pairs an action with its inverse.
    pub fn new(undo_action: A, redo_action: A) -> OperationRecord<A> {
        OperationRecord {
            undo_action,
            redo_action,
        }
    }

    /// Returns the action that reverts the change.
    pub fn undo_action(&self) -> &A {
        &self.undo_action
    }

    /// Returns the action that applies the change again.
    pub fn redo_action(&self) -> &A {
        &self.redo_action
    }
}

impl<A: fmt::Display> fmt::Display for OperationRecord<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.redo_action.fmt(f)
    }
}

/// The undoable operations of the shop.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum OperationKind {
    /// A client was added.
    AddClient,
    /// A client was removed with its rentals.
    RemoveClient,
    /// A client was renamed.
    UpdateClient,
    /// A movie was added.
    AddMovie,
    /// A movie was removed with its rentals.
    RemoveMovie,
    /// A movie was changed.
    UpdateMovie,
    /// A movie was rented.
    RentMovie,
    /// A rented movie was brought back.
    ReturnMovie,
}

impl OperationKind {
    /// Returns the handler that reverts this kind of operation.
    pub fn undo_handler(self) -> Handler {
        match self {
            OperationKind::AddClient => Handler::RemoveClient,
            OperationKind::RemoveClient => Handler::AddClientAndRentals,
            OperationKind::UpdateClient => Handler::UpdateClient,
            OperationKind::AddMovie => Handler::RemoveMovie,
            OperationKind::RemoveMovie => Handler::AddMovieAndRentals,
            OperationKind::UpdateMovie => Handler::UpdateMovie,
            OperationKind::RentMovie => Handler::DeleteRental,
            OperationKind::ReturnMovie => Handler::CancelReturn,
        }
    }

    /// Returns the handler that applies this kind of operation again.
    pub fn redo_handler(self) -> Handler {
        match self {
            OperationKind::AddClient => Handler::AddClient,
            OperationKind::RemoveClient => Handler::RemoveClient,
            OperationKind::UpdateClient => Handler::UpdateClient,
            OperationKind::AddMovie => Handler::AddMovie,
            OperationKind::RemoveMovie => Handler::RemoveMovie,
            OperationKind::UpdateMovie => Handler::UpdateMovie,
            OperationKind::RentMovie => Handler::AddRental,
            OperationKind::ReturnMovie => Handler::ReturnMovie,
        }
    }
}
