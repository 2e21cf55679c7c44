use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::config::default_capacity;
use crate::error::{BuildError, Closed, Dropped, TryDequeueError, TryEnqueueError};
use crate::queue::{BlockingQueue, Queue};

/// A bounded FIFO queue shared by any number of producers and consumers.
///
/// Values are kept in insertion order behind one mutex. Producers park on
/// `not_full` while the queue is at capacity, consumers park on `not_empty`
/// while it has nothing to hand out. `shutdown` stops admissions and releases
/// every parked thread; values already queued can still be taken until the
/// queue runs dry.
pub struct BoundedBlockingQueue<T> {
    inner: Mutex<Inner<T>>,
    capacity: usize,
    name: Option<String>,
    not_empty: Condvar,
    not_full: Condvar,
}

struct Inner<T> {
    items: VecDeque<T>,
    shutdown: bool,
}

/// Lifecycle of a queue, as seen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Admitting values.
    Active,
    /// Shut down, values left to take.
    Draining,
    /// Shut down and empty. Final.
    Closed,
}

impl<T> BoundedBlockingQueue<T> {
    /// Creates an empty queue holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self::from_parts(capacity, None)
    }

    /// Like `new`, but reports a zero capacity instead of panicking.
    pub fn try_new(capacity: usize) -> Result<Self, BuildError> {
        Self::with_name(capacity, None)
    }

    pub(crate) fn with_name(capacity: usize, name: Option<String>) -> Result<Self, BuildError> {
        if capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }
        Ok(Self::from_parts(capacity, name))
    }

    fn from_parts(capacity: usize, name: Option<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                shutdown: false,
            }),
            capacity,
            name,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    // No user code runs under the lock, so a poisoned guard still holds a
    // consistent state.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Adds `value` to the tail, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// If the queue is shut down before the value could be added, the value is
    /// returned inside `Dropped` and the queue is left unchanged.
    pub fn push(&self, value: T) -> Result<(), Dropped<T>> {
        let mut inner = self.lock();
        let mut waited = false;

        while inner.items.len() == self.capacity && !inner.shutdown {
            if !waited {
                tracing::trace!(queue = self.label(), capacity = self.capacity, "full, producer waiting");
                waited = true;
            }
            inner = self.not_full.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }

        if inner.shutdown {
            drop(inner);
            if waited {
                tracing::trace!(queue = self.label(), "producer released by shutdown");
            }
            return Err(Dropped(value));
        }

        inner.items.push_back(value);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Takes the head of the queue, waiting while it is empty.
    ///
    /// # Errors
    ///
    /// Returns `Closed` once the queue is shut down and holds nothing. No value
    /// will ever be available again at that point.
    pub fn pop(&self) -> Result<T, Closed> {
        let mut inner = self.lock();
        let mut waited = false;

        while inner.items.is_empty() && !inner.shutdown {
            if !waited {
                tracing::trace!(queue = self.label(), "empty, consumer waiting");
                waited = true;
            }
            inner = self.not_empty.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }

        match inner.items.pop_front() {
            Some(value) => {
                self.not_full.notify_one();
                Ok(value)
            }
            None => {
                drop(inner);
                if waited {
                    tracing::trace!(queue = self.label(), "consumer released by shutdown");
                }
                Err(Closed)
            }
        }
    }

    /// Adds `value` only if that can be done without waiting.
    pub fn try_push(&self, value: T) -> Result<(), TryEnqueueError<T>> {
        let mut inner = self.lock();

        if inner.shutdown {
            return Err(TryEnqueueError::Shutdown(value));
        }
        if inner.items.len() == self.capacity {
            return Err(TryEnqueueError::Full(value));
        }

        inner.items.push_back(value);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Takes the head only if one is available right now.
    pub fn try_pop(&self) -> Result<T, TryDequeueError> {
        let mut inner = self.lock();

        match inner.items.pop_front() {
            Some(value) => {
                self.not_full.notify_one();
                Ok(value)
            }
            None if inner.shutdown => Err(TryDequeueError::Closed),
            None => Err(TryDequeueError::Empty),
        }
    }

    /// Stops admitting values and wakes every parked producer and consumer.
    ///
    /// Values already queued stay available. Returns `true` for the call that
    /// actually shut the queue down, `false` for any later call.
    pub fn shutdown(&self) -> bool {
        let mut inner = self.lock();

        if inner.shutdown {
            return false;
        }

        inner.shutdown = true;
        let remaining = inner.items.len();
        self.not_empty.notify_all();
        self.not_full.notify_all();
        drop(inner);

        tracing::debug!(queue = self.label(), capacity = self.capacity, remaining, "shut down");
        true
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    /// Returns the number of values in the queue.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The remaining capacity.
    pub fn slack(&self) -> usize {
        self.capacity - self.len()
    }

    pub fn state(&self) -> State {
        let inner = self.lock();

        match (inner.shutdown, inner.items.is_empty()) {
            (false, _) => State::Active,
            (true, false) => State::Draining,
            (true, true) => State::Closed,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A blocking iterator that ends once the queue is closed.
    ///
    /// ```
    /// use easy_queue::BoundedBlockingQueue;
    ///
    /// let q = BoundedBlockingQueue::new(4);
    /// q.push(1).unwrap();
    /// q.push(2).unwrap();
    /// q.shutdown();
    ///
    /// assert_eq!(q.iter().collect::<Vec<_>>(), [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { queue: self }
    }

    /// Iterates over the values available without waiting.
    pub fn try_iter(&self) -> TryIter<'_, T> {
        TryIter { queue: self }
    }
}

impl<T> Queue<T> for BoundedBlockingQueue<T> {
    fn try_push(&self, value: T) -> Result<(), TryEnqueueError<T>> {
        BoundedBlockingQueue::try_push(self, value)
    }

    fn try_pop(&self) -> Result<T, TryDequeueError> {
        BoundedBlockingQueue::try_pop(self)
    }

    fn len(&self) -> usize {
        BoundedBlockingQueue::len(self)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_empty(&self) -> bool {
        BoundedBlockingQueue::is_empty(self)
    }
}

impl<T> BlockingQueue<T> for BoundedBlockingQueue<T> {
    fn push(&self, value: T) -> Result<(), Dropped<T>> {
        BoundedBlockingQueue::push(self, value)
    }

    fn pop(&self) -> Result<T, Closed> {
        BoundedBlockingQueue::pop(self)
    }

    fn shutdown(&self) -> bool {
        BoundedBlockingQueue::shutdown(self)
    }

    fn is_shutdown(&self) -> bool {
        BoundedBlockingQueue::is_shutdown(self)
    }
}

impl<T> Default for BoundedBlockingQueue<T> {
    fn default() -> Self {
        Self::new(default_capacity())
    }
}

impl<T> Drop for BoundedBlockingQueue<T> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        let remaining = inner.items.len();

        if remaining > 0 {
            tracing::debug!(
                queue = self.name.as_deref().unwrap_or("unnamed"),
                remaining,
                "dropping queued values"
            );
        }

        inner.items.clear();
    }
}

impl<T> fmt::Debug for BoundedBlockingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();

        f.debug_struct("BoundedBlockingQueue")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &inner.items.len())
            .field("shutdown", &inner.shutdown)
            .finish()
    }
}

/// Blocking iterator returned by `BoundedBlockingQueue::iter`.
pub struct Iter<'a, T> {
    queue: &'a BoundedBlockingQueue<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop().ok()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Non-blocking iterator returned by `BoundedBlockingQueue::try_iter`.
pub struct TryIter<'a, T> {
    queue: &'a BoundedBlockingQueue<T>,
}

impl<T> Iterator for TryIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.try_pop().ok()
    }
}

impl<'a, T> IntoIterator for &'a BoundedBlockingQueue<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
