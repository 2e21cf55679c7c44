use std::fmt;

use thiserror::Error;

/// Failure to build a queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("capacity must be positive")]
    ZeroCapacity,

    #[error("capacity {0} exceeds the maximum of {max}", max = crate::config::MAX_CAPACITY)]
    TooLarge(usize),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// An enqueue rejected because the queue was shut down.
///
/// The item is handed back untouched.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is shut down")]
pub struct Dropped<T>(pub T);

impl<T> Dropped<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Dropped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dropped(..)")
    }
}

/// The queue is shut down and every buffered item has been taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is shut down and drained")]
pub struct Closed;

/// Error returned by `try_push`.
#[derive(Clone, Copy, PartialEq, Eq, Error)]
pub enum TryEnqueueError<T> {
    #[error("queue is full")]
    Full(T),
    #[error("queue is shut down")]
    Shutdown(T),
}

impl<T> TryEnqueueError<T> {
    /// Take back the rejected item.
    pub fn into_inner(self) -> T {
        match self {
            Self::Full(value) | Self::Shutdown(value) => value,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown(_))
    }
}

impl<T> fmt::Debug for TryEnqueueError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(_) => f.write_str("Full(..)"),
            Self::Shutdown(_) => f.write_str("Shutdown(..)"),
        }
    }
}

impl<T> From<Dropped<T>> for TryEnqueueError<T> {
    fn from(Dropped(value): Dropped<T>) -> Self {
        Self::Shutdown(value)
    }
}

/// Error returned by `try_pop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TryDequeueError {
    #[error("queue is empty")]
    Empty,
    #[error("queue is shut down and drained")]
    Closed,
}

impl From<Closed> for TryDequeueError {
    fn from(_: Closed) -> Self {
        Self::Closed
    }
}
