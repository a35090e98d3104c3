//! Line-source collaborators.
//!
//! # Data Flow
//! ```text
//! file (tail.rs) ─┐
//! stdin ──────────┼─▶ reader.rs (split on '\n', trim, drop blanks)
//! child (command.rs)┘     → mpsc<String> → pipeline
//! ```
//!
//! # Design Decisions
//! - Sources only deliver text; they know nothing about records or alerts
//! - Backpressure comes from the bounded channel, never from dropping lines
//! - A source that can no longer produce lines ends with an error, which
//!   is fatal for the process

pub mod command;
pub mod reader;
pub mod tail;

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::config::{SourceConfig, SourceKind};
use crate::error::IngestError;

pub use command::CommandSource;
pub use tail::FileTail;

/// Where lines come from.
#[derive(Debug, Clone)]
pub enum LineSource {
    File(FileTail),
    Stdin,
    Command(CommandSource),
}

impl LineSource {
    /// Build the configured source. Assumes a validated config.
    pub fn from_config(config: &SourceConfig) -> Self {
        match config.kind {
            SourceKind::File => LineSource::File(FileTail {
                path: PathBuf::from(config.path.clone().unwrap_or_default()),
                poll_interval: Duration::from_millis(config.poll_interval_ms),
                missing_retry: Duration::from_millis(config.missing_file_retry_ms),
                from_start: config.from_start,
            }),
            SourceKind::Stdin => LineSource::Stdin,
            SourceKind::Command => LineSource::Command(CommandSource {
                program: config.program.clone().unwrap_or_default(),
                args: config.args.clone(),
            }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            LineSource::File(tail) => format!("file {}", tail.path.display()),
            LineSource::Stdin => "stdin".to_string(),
            LineSource::Command(command) => format!("command `{}`", command.describe()),
        }
    }

    /// Produce lines into `tx` until the source ends or shutdown fires.
    pub async fn run(
        self,
        tx: mpsc::Sender<String>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), IngestError> {
        match self {
            LineSource::File(tail) => tail.run(tx, shutdown).await,
            LineSource::Command(command) => command.run(tx, shutdown).await,
            LineSource::Stdin => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                let end = reader::pump_lines(stdin, &tx, &mut shutdown).await?;
                tracing::info!(?end, "Standard input finished");
                Ok(())
            }
        }
    }
}
