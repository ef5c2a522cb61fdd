use crate::socket::Socket;
use crate::OperationManager;
use core::marker::PhantomData;

/// Builder for an [`OperationManager`].
///
/// # Examples
/// ```
/// # use rental_undo::{OperationManager, ReversibleAction, Signal};
/// let manager: OperationManager<ReversibleAction, _> = OperationManager::builder()
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// assert!(manager.capacity() >= 100);
/// ```
#[derive(Debug)]
pub struct Builder<A, S = ()> {
    capacity: usize,
    socket: Socket<S>,
    pd: PhantomData<A>,
}

impl<A, S> Builder<A, S> {
    /// Sets the capacity for the manager.
    pub fn capacity(mut self, capacity: usize) -> Builder<A, S> {
        self.capacity = capacity;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<A, S> {
        self.socket = Socket::with(slot);
        self
    }

    /// Builds the manager.
    pub fn build(self) -> OperationManager<A, S> {
        OperationManager {
            entries: Vec::with_capacity(self.capacity),
            cursor: None,
            socket: self.socket,
        }
    }
}

impl<A, S> Default for Builder<A, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}
