//! Crate-wide error definitions.
//!
//! Parse misses are not errors: the parser returns `None` for lines it
//! cannot use. Only configuration, ingestion and delivery failures are
//! represented here.

use thiserror::Error;

pub use crate::config::loader::ConfigError;

/// Errors raised by line sources.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reading from the underlying file, pipe or child failed.
    #[error("I/O error reading log source: {0}")]
    Io(#[from] std::io::Error),

    /// The log-producing child process could not be started.
    #[error("failed to spawn `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The source ended and cannot produce more lines.
    #[error("log source closed: {0}")]
    SourceClosed(String),
}

/// Errors raised while delivering an alert to a notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure.
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("webhook returned status {0}")]
    Status(u16),

    /// The request did not complete within the configured deadline.
    #[error("webhook request timed out after {0} seconds")]
    Timeout(u64),
}

/// Top-level error for the watcher process.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type WatcherResult<T> = Result<T, WatcherError>;
