//! Bounded retries for failing async operations.
//!
//! # Key Types
//!
//! - [`RetryPolicy`] - How many retries and how long to pause between them
//! - [`RetryDelay`] - No delay, a fixed delay, or a delay computed per retry
//! - [`with_retries`] - Execute an operation under a policy
//!
//! # Examples
//!
//! ```rust
//! use steadfast::retry::{RetryPolicy, with_retries};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let policy = RetryPolicy::builder()
//!     .times(2)
//!     .delay(Duration::from_millis(50))
//!     .build();
//!
//! let value = with_retries(|| async { Ok::<_, std::io::Error>("done") }, &policy).await?;
//! assert_eq!(value, "done");
//! # Ok(())
//! # }
//! ```

mod execute;
mod policy;

pub use execute::with_retries;
pub use policy::{RetryDelay, RetryPolicy, RetryPolicyBuilder};
