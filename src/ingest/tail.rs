//! Follow a growing log file.
//!
//! # Responsibilities
//! - Wait for the file to appear (nginx may start after the watcher)
//! - Start at the end (or the beginning, when asked) and poll for growth
//! - Start over when the file is truncated or removed
//!
//! # Design Decisions
//! - Polling instead of inotify: works on bind mounts and shared volumes
//! - A trailing line without newline is held until it is completed

use std::io::SeekFrom;
use std::path::PathBuf;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::{broadcast, mpsc};

use crate::error::IngestError;
use crate::ingest::reader::forward_line;

#[derive(Debug, Clone)]
pub struct FileTail {
    pub path: PathBuf,
    pub poll_interval: Duration,
    pub missing_retry: Duration,
    pub from_start: bool,
}

enum Waited {
    Ready,
    Shutdown,
}

impl FileTail {
    pub async fn run(
        self,
        tx: mpsc::Sender<String>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), IngestError> {
        let mut from_start = self.from_start;

        loop {
            let Some(file) = self.open(&mut shutdown).await? else {
                return Ok(());
            };

            let mut position = if from_start {
                0
            } else {
                file.metadata().await?.len()
            };
            let mut reader = BufReader::new(file);
            reader.seek(SeekFrom::Start(position)).await?;
            tracing::info!(path = %self.path.display(), position, "Tailing log file");

            let mut pending = Vec::new();
            loop {
                let read = reader.read_until(b'\n', &mut pending).await?;
                if read > 0 {
                    position += read as u64;
                    if pending.ends_with(b"\n") {
                        if !forward_line(&tx, &pending).await {
                            return Ok(());
                        }
                        pending.clear();
                    }
                    continue;
                }

                if self.rotated(position).await {
                    tracing::info!(path = %self.path.display(), "Log file truncated or removed, reopening");
                    break;
                }

                if let Waited::Shutdown = self.pause(self.poll_interval, &mut shutdown).await {
                    return Ok(());
                }
            }

            // Whatever replaced the file is new content.
            from_start = true;
        }
    }

    /// Open the file, retrying while it does not exist.
    async fn open(
        &self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Option<File>, IngestError> {
        let mut warned = false;
        loop {
            match File::open(&self.path).await {
                Ok(file) => return Ok(Some(file)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    if !warned {
                        tracing::warn!(path = %self.path.display(), "Log file not found, waiting for it");
                        warned = true;
                    }
                    if let Waited::Shutdown = self.pause(self.missing_retry, shutdown).await {
                        return Ok(None);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// True when the file on disk is now shorter than what we have read,
    /// or gone.
    async fn rotated(&self, position: u64) -> bool {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len() < position,
            Err(_) => true,
        }
    }

    async fn pause(&self, delay: Duration, shutdown: &mut broadcast::Receiver<()>) -> Waited {
        tokio::select! {
            _ = tokio::time::sleep(delay) => Waited::Ready,
            _ = shutdown.recv() => Waited::Shutdown,
        }
    }
}
