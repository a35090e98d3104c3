//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → notifier → dispatcher task → source task → pipeline
//!
//! Shutdown (shutdown.rs):
//!     Signal or end of input → pipeline stops → queue closes
//!     → dispatcher drains → source stops → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: delivery first, then ingestion, then processing
//! - Ordered shutdown: stop processing, deliver what is queued, close
//! - Dispatcher drain has a deadline: the notifier timeout

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, RunSummary};
