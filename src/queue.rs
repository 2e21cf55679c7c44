use crate::error::{Closed, Dropped, TryDequeueError, TryEnqueueError};

/// Non-blocking access to a bounded queue.
pub trait Queue<T> {
    /// Return the value back if it can not be queued right now.
    fn try_push(&self, value: T) -> Result<(), TryEnqueueError<T>>;
    fn try_pop(&self) -> Result<T, TryDequeueError>;
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
    /// The remaining capacity.
    fn slack(&self) -> usize {
        self.capacity() - self.len()
    }
}

/// A queue whose producers and consumers park until they can make progress,
/// and which can be shut down to release all of them.
pub trait BlockingQueue<T>: Queue<T> {
    /// Adds the value to the tail, waiting while the queue is full.
    ///
    /// The value is handed back if the queue is, or becomes, shut down.
    fn push(&self, value: T) -> Result<(), Dropped<T>>;

    /// Takes the head, waiting while the queue is empty.
    ///
    /// Returns `Closed` once the queue is shut down and nothing is left.
    fn pop(&self) -> Result<T, Closed>;

    /// Stop admitting values and wake every waiter.
    fn shutdown(&self) -> bool;

    fn is_shutdown(&self) -> bool;
}
