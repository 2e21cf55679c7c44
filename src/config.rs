use std::env;

use crate::bounded::BoundedBlockingQueue;
use crate::error::BuildError;

pub const DEFAULT_CAPACITY: usize = 1024;

pub const MIN_CAPACITY: usize = 1;

pub const MAX_CAPACITY: usize = 1 << 20;

pub const ENV_CAPACITY_NAME: &str = "EASY_QUEUE_CAPACITY";

/// Capacity used by `BoundedBlockingQueue::default`.
///
/// Read from `EASY_QUEUE_CAPACITY`, falling back to `DEFAULT_CAPACITY` when the
/// variable is missing or invalid.
pub fn default_capacity() -> usize {
    match env::var(ENV_CAPACITY_NAME) {
        Ok(s) => parse_capacity(&s).unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default capacity {}", DEFAULT_CAPACITY);
            DEFAULT_CAPACITY
        }),
        Err(_) => DEFAULT_CAPACITY,
    }
}

fn parse_capacity(s: &str) -> Result<usize, BuildError> {
    let invalid = || BuildError::InvalidEnv {
        var: ENV_CAPACITY_NAME,
        value: s.to_owned(),
    };

    let capacity: usize = s.trim().parse().map_err(|_| invalid())?;

    if capacity < MIN_CAPACITY {
        return Err(invalid());
    }
    if capacity > MAX_CAPACITY {
        return Err(BuildError::TooLarge(capacity));
    }

    Ok(capacity)
}

/// Configures a `BoundedBlockingQueue` before it is built.
///
/// ```
/// use easy_queue::config::Builder;
/// use easy_queue::BoundedBlockingQueue;
///
/// let q: BoundedBlockingQueue<u32> = Builder::new().capacity(8).name("jobs").build().unwrap();
/// assert_eq!(q.capacity(), 8);
/// assert_eq!(q.name(), Some("jobs"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    capacity: Option<usize>,
    name: Option<String>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the capacity in `EASY_QUEUE_CAPACITY`.
    ///
    /// Unlike `default_capacity`, an unparsable or out of range value is an
    /// error. A missing variable leaves the default in place.
    pub fn from_env() -> Result<Self, BuildError> {
        let capacity = match env::var(ENV_CAPACITY_NAME) {
            Ok(s) => Some(parse_capacity(&s)?),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(s)) => {
                return Err(BuildError::InvalidEnv {
                    var: ENV_CAPACITY_NAME,
                    value: s.to_string_lossy().into_owned(),
                })
            }
        };

        Ok(Self {
            capacity,
            name: None,
        })
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Label attached to the queue's log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build<T>(self) -> Result<BoundedBlockingQueue<T>, BuildError> {
        let capacity = self.capacity.unwrap_or(DEFAULT_CAPACITY);
        BoundedBlockingQueue::with_name(capacity, self.name)
    }
}
