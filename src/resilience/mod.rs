//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Alert delivery:
//!     → timeouts.rs (every webhook call has a deadline)
//!     → On failure: retries.rs (retry with backoff.rs delays)
//!     → After the last attempt: give up, log, move on
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Retries are bounded so a dead webhook cannot stall the queue forever
//! - Delivery failure never touches detector state

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{retry, RetryPolicy};
pub use timeouts::with_timeout;
