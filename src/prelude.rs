pub use crate::bounded::{BoundedBlockingQueue, State};
pub use crate::config::Builder;
pub use crate::error::{BuildError, Closed, Dropped, TryDequeueError, TryEnqueueError};
pub use crate::queue::{BlockingQueue, Queue};
