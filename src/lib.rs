//! A bounded blocking FIFO queue for many producers and many consumers, with a
//! drain-then-close shutdown.
//!
//! ```
//! use std::thread;
//!
//! use easy_queue::BoundedBlockingQueue;
//!
//! let q = BoundedBlockingQueue::new(2);
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         for i in 0..10 {
//!             q.push(i).unwrap();
//!         }
//!         q.shutdown();
//!     });
//!
//!     let got: Vec<_> = q.iter().collect();
//!     assert_eq!(got, (0..10).collect::<Vec<_>>());
//! });
//! ```

pub mod bounded;
pub mod config;
pub mod error;
pub mod prelude;
pub mod queue;

pub use bounded::{BoundedBlockingQueue, State};
pub use error::{BuildError, Closed, Dropped, TryDequeueError, TryEnqueueError};
