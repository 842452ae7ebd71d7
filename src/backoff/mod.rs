//! Exponential backoff delay calculation.
//!
//! # Key Types
//!
//! - [`ExponentialBackoff`] - Configured delay calculator with jitter
//! - [`ExponentialBackoffBuilder`] - Fluent configuration
//!
//! # Examples
//!
//! ```rust
//! use steadfast::backoff::ExponentialBackoff;
//! use std::time::Duration;
//!
//! let backoff = ExponentialBackoff::builder()
//!     .slot_time(Duration::from_millis(500))
//!     .max_time(Duration::from_secs(30))
//!     .build();
//!
//! let first = backoff.delay(0);  // 500ms ≤ first < 1000ms
//! let second = backoff.delay(1); // 1000ms ≤ second < 1500ms
//! ```

mod exponential;

pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};
