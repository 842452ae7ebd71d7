#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Resilient-execution primitives for asynchronous work.
//!
//! This crate provides three small, composable pieces that share one concern:
//! how to react to failure of an async unit of work over time and across a
//! sequence.
//!
//! - **Exponential backoff** via [`ExponentialBackoff`]
//!   - `2^attempt * slot_time` growth with uniform jitter
//!   - Hard cap through `max_time`
//!   - Injectable RNG for deterministic tests
//! - **Bounded retries** via [`RetryPolicy`] and [`with_retries`]
//! - **Serial task runs** via [`SerialExecution`] and [`run_serially`]
//!
//! The pieces compose by convention, not by coupling: an operation is any
//! zero-argument async closure returning `Result<T, E>`. A retry-wrapped
//! operation is itself an operation and can sit in a serial task list; a
//! retry policy's delay can be fixed, absent, or computed per retry (for
//! example by an [`ExponentialBackoff`]).
//!
//! # Examples
//!
//! Retrying a flaky operation with capped exponential backoff:
//!
//! ```rust
//! use steadfast::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let backoff = ExponentialBackoff::builder()
//!     .slot_time(Duration::from_millis(100))
//!     .max_time(Duration::from_secs(5))
//!     .build();
//!
//! let policy = RetryPolicy::builder()
//!     .times(3)
//!     .delay(backoff)
//!     .build();
//!
//! let value = policy.run(|| async { Ok::<_, std::io::Error>(42) }).await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```
//!
//! Running an ordered batch one task at a time, tolerating failures:
//!
//! ```rust
//! use steadfast::prelude::*;
//!
//! # async fn example() {
//! let tasks: Vec<BoxedTask<u32, std::io::Error>> = vec![
//!     Box::new(|| Box::pin(async { Ok(1) })),
//!     Box::new(|| Box::pin(async { Ok(2) })),
//! ];
//!
//! let run = SerialExecution::new(tasks)
//!     .always_resolve(true)
//!     .on_task_finish(|resolved, index| println!("task {index}: {resolved}"));
//!
//! let values = run_serially(run).await.unwrap();
//! assert_eq!(values, vec![1, 2]);
//! # }
//! ```
//!
//! [`ExponentialBackoff`]: backoff::ExponentialBackoff
//! [`RetryPolicy`]: retry::RetryPolicy
//! [`with_retries`]: retry::with_retries
//! [`SerialExecution`]: serial::SerialExecution
//! [`run_serially`]: serial::run_serially

pub mod backoff;
pub mod retry;
pub mod serial;

/// Convenient re-exports of commonly used items.
///
/// Import all core types with:
///
/// ```rust
/// use steadfast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
    pub use crate::retry::{RetryDelay, RetryPolicy, RetryPolicyBuilder, with_retries};
    pub use crate::serial::{BoxedTask, SerialExecution, run_serially};
}
