//! Change notifications from the operation manager.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// A change in what the [`OperationManager`](crate::OperationManager) can do.
///
/// See [`Slot`] for how to receive them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Undo became possible (`true`) or impossible (`false`).
    Undo(bool),
    /// Redo became possible (`true`) or impossible (`false`).
    Redo(bool),
    /// The cursor now points at this record.
    Cursor(Option<usize>),
}

/// Receiver of the signals of a manager.
///
/// A front end connects one to keep its undo and redo controls in step
/// with the history. Signals arrive in the order `Undo`, `Redo`, `Cursor`,
/// and only for what actually changed.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use rental_undo::{OperationManager, Signal, Shop};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let manager = OperationManager::builder().connect(sender).build();
/// let mut shop = Shop::in_memory_with(manager);
///
/// shop.add_client(1, "A").unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Cursor(Some(0))));
/// assert_eq!(iter.next(), None);
///
/// shop.undo().unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Cursor(None)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Called once per signal.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

// A hung up receiver only means nobody listens anymore.
impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}

/// The part of the manager state a slot is told about.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Status {
    pub can_undo: bool,
    pub can_redo: bool,
    pub cursor: Option<usize>,
}

/// Holds the optional slot of a manager.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S> {
    slot: Option<S>,
}

impl<S> Socket<S> {
    pub fn with(slot: S) -> Socket<S> {
        Socket { slot: Some(slot) }
    }

    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.slot.replace(slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.slot.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket { slot: None }
    }
}

impl<S: Slot> Socket<S> {
    /// Emits a signal for each field that differs between `before` and `after`.
    pub fn notify(&mut self, before: Status, after: Status) {
        let Some(slot) = &mut self.slot else {
            return;
        };
        if before.can_undo != after.can_undo {
            slot.on_emit(Signal::Undo(after.can_undo));
        }
        if before.can_redo != after.can_redo {
            slot.on_emit(Signal::Redo(after.can_redo));
        }
        if before.cursor != after.cursor {
            slot.on_emit(Signal::Cursor(after.cursor));
        }
    }
}
