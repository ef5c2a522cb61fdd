//! The linear history of recorded operations.

mod builder;
mod display;

pub use self::{builder::Builder, display::Display};

use crate::socket::{Socket, Status};
use crate::{Entry, Error, Invoke, OperationRecord, ReversibleAction, Result, Slot};
use core::fmt;

/// A linear history of reversible operations.
///
/// The manager does not apply operations itself. The caller performs a
/// mutation, then hands the matching [`OperationRecord`] to
/// [`record_operation`](OperationManager::record_operation). Undo and redo
/// walk a cursor over the history and invoke the stored actions.
///
/// The cursor points at the last applied record, or is `None` when there is
/// nothing to undo. Recording after an undo drops the undone records for good;
/// there are no branches.
///
/// The manager can notify a [`Slot`] about its state changes, see
/// [`builder`](OperationManager::builder).
///
/// # Examples
/// ```
/// # use rental_undo::{Shop, Error};
/// let mut shop = Shop::in_memory();
/// shop.add_client(1, "A").unwrap();
/// shop.add_client(2, "B").unwrap();
/// shop.undo().unwrap();
/// assert_eq!(shop.manager().cursor(), Some(0));
/// shop.undo().unwrap();
/// assert_eq!(shop.undo(), Err(Error::UndoUnavailable));
/// shop.redo().unwrap();
/// shop.redo().unwrap();
/// assert_eq!(shop.redo(), Err(Error::RedoUnavailable));
/// assert_eq!(shop.clients().list().len(), 2);
/// ```
pub struct OperationManager<A = ReversibleAction, S = ()> {
    pub(crate) entries: Vec<Entry<OperationRecord<A>>>,
    pub(crate) cursor: Option<usize>,
    pub(crate) socket: Socket<S>,
}

impl<A> OperationManager<A> {
    /// Returns a new, empty manager.
    pub fn new() -> OperationManager<A> {
        Builder::default().build()
    }
}

impl<A, S> OperationManager<A, S> {
    /// Returns a builder for a manager.
    pub fn builder() -> Builder<A, S> {
        Builder::default()
    }

    /// Returns the capacity of the manager.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the number of records in the history.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index of the last applied record.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns `true` if the manager can undo.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns `true` if the manager can redo.
    pub fn can_redo(&self) -> bool {
        self.next() < self.len()
    }

    fn next(&self) -> usize {
        self.cursor.map_or(0, |cursor| cursor + 1)
    }

    fn status(&self) -> Status {
        Status {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            cursor: self.cursor,
        }
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(slot)
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns an iterator over the entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<OperationRecord<A>>> {
        self.entries.iter()
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<A, S> {
        Display::from(self)
    }
}

impl<A, S: Slot> OperationManager<A, S> {
    /// Appends `record` after the cursor and makes it the last applied one.
    ///
    /// Records that were undone and not redone are discarded first.
    pub fn record_operation(&mut self, record: OperationRecord<A>) {
        let before = self.status();
        // Pop off all records after the cursor.
        let tail = self.entries.split_off(self.next());
        self.entries.push(Entry::from(record));
        let cursor = self.entries.len() - 1;
        self.cursor = Some(cursor);
        log::debug!(
            "recorded operation {} ({} undone record(s) dropped)",
            cursor,
            tail.len()
        );
        let after = self.status();
        self.socket.notify(before, after);
    }
}

impl<A: Invoke, S: Slot> OperationManager<A, S> {
    /// Invokes the undo action of the record at the cursor, then moves the
    /// cursor back.
    ///
    /// # Errors
    /// Returns [`Error::UndoUnavailable`] if there is nothing to undo.
    /// Errors from the action are returned unchanged and leave the cursor where it was.
    pub fn undo(&mut self) -> Result {
        let cursor = self.cursor.ok_or(Error::UndoUnavailable)?;
        if let Err(err) = self.entries[cursor].get().undo_action().invoke() {
            log::warn!("undo of operation {} failed: {}", cursor, err);
            return Err(err);
        }
        let before = self.status();
        self.cursor = cursor.checked_sub(1);
        log::debug!("undid operation {}", cursor);
        let after = self.status();
        self.socket.notify(before, after);
        Ok(())
    }

    /// Moves the cursor forward, then invokes the redo action of the record
    /// it now points at.
    ///
    /// # Errors
    /// Returns [`Error::RedoUnavailable`] if the cursor is at the last record.
    /// Errors from the action are returned unchanged. The cursor has already
    /// moved when the action runs and is not moved back.
    pub fn redo(&mut self) -> Result {
        let next = self.next();
        if next >= self.len() {
            return Err(Error::RedoUnavailable);
        }
        let before = self.status();
        self.cursor = Some(next);
        let after = self.status();
        self.socket.notify(before, after);
        match self.entries[next].get().redo_action().invoke() {
            Ok(()) => {
                log::debug!("redid operation {}", next);
                Ok(())
            }
            Err(err) => {
                log::warn!("redo of operation {} failed: {}", next, err);
                Err(err)
            }
        }
    }
}

impl<A: fmt::Display, S> OperationManager<A, S> {
    /// Returns the description of the operation the next
    /// [`undo`](OperationManager::undo) reverts.
    pub fn undo_text(&self) -> Option<String> {
        self.cursor.and_then(|cursor| self.text(cursor))
    }

    /// Returns the description of the operation the next
    /// [`redo`](OperationManager::redo) applies.
    pub fn redo_text(&self) -> Option<String> {
        self.text(self.next())
    }

    fn text(&self, i: usize) -> Option<String> {
        self.entries.get(i).map(|e| e.get().to_string())
    }
}

impl<A> Default for OperationManager<A> {
    fn default() -> OperationManager<A> {
        OperationManager::new()
    }
}

impl<A: fmt::Debug, S> fmt::Debug for OperationManager<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OperationManager")
            .field("entries", &self.entries)
            .field("cursor", &self.cursor)
            .finish()
    }
}
