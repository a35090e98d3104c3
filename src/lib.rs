//! Blue/green access-log watcher library.
//!
//! Classifies reverse-proxy access-log lines, keeps a bounded window of
//! recent requests, and raises rate-limited alerts on pool failover and
//! on upstream 5xx spikes.

pub mod alert;
pub mod clock;
pub mod config;
pub mod detect;
pub mod error;
pub mod ingest;
pub mod lifecycle;
pub mod observability;
pub mod parser;
pub mod pipeline;
pub mod resilience;

pub use config::schema::WatcherConfig;
pub use lifecycle::Shutdown;
pub use pipeline::Watcher;
