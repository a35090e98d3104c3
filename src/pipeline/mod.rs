//! Line-processing pipeline.
//!
//! # Data Flow
//! ```text
//! line source ──mpsc<String>──▶ runner.rs ──▶ watcher.rs
//!                                              parse → window → failover
//!                                              → error rate → gate → sink
//! ```
//!
//! # Design Decisions
//! - One task owns all detector state; no locks
//! - Strictly sequential: a line is fully evaluated before the next
//! - Only lines that fail parsing are dropped

pub mod runner;
pub mod watcher;

pub use runner::run_pipeline;
pub use watcher::{LineOutcome, Watcher, WatcherStats};
