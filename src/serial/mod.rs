//! Serial execution of ordered async task lists.
//!
//! # Key Types
//!
//! - [`SerialExecution`] - The task list, tolerance flag, and per-task hooks
//! - [`run_serially`] - Execute the list one task at a time
//! - [`BoxedTask`] - Type-erased task for heterogeneous lists
//!
//! # Examples
//!
//! ```rust
//! use steadfast::serial::{BoxedTask, SerialExecution, run_serially};
//!
//! # async fn example() {
//! let tasks: Vec<BoxedTask<&str, std::io::Error>> = vec![
//!     Box::new(|| Box::pin(async { Ok("first") })),
//!     Box::new(|| Box::pin(async { Ok("second") })),
//! ];
//!
//! let values = run_serially(SerialExecution::new(tasks)).await.unwrap();
//! assert_eq!(values, vec!["first", "second"]);
//! # }
//! ```

mod runner;

pub use runner::{BoxedTask, SerialExecution, run_serially};
