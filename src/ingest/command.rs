//! Follow the output of a child process (e.g. `docker logs -f nginx_proxy`).

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::{broadcast, mpsc};

use crate::error::IngestError;
use crate::ingest::reader::forward_line;

#[derive(Debug, Clone)]
pub struct CommandSource {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSource {
    pub fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Forward stdout and stderr lines until the child exits or shutdown.
    ///
    /// The child exiting on its own means the log stream is gone, which is
    /// fatal for the watcher.
    pub async fn run(
        self,
        tx: mpsc::Sender<String>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), IngestError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| IngestError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        tracing::info!(command = %self.describe(), "Connected to log stream");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| IngestError::SourceClosed("child stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| IngestError::SourceClosed("child stderr unavailable".into()))?;

        // nginx writes its logs to stderr inside the container; merge both.
        let mut out = BufReader::new(stdout).split(b'\n');
        let mut err = BufReader::new(stderr).split(b'\n');
        let (mut out_open, mut err_open) = (true, true);

        while out_open || err_open {
            tokio::select! {
                segment = out.next_segment(), if out_open => match segment? {
                    Some(raw) => {
                        if !forward_line(&tx, &raw).await {
                            return Ok(());
                        }
                    }
                    None => out_open = false,
                },
                segment = err.next_segment(), if err_open => match segment? {
                    Some(raw) => {
                        if !forward_line(&tx, &raw).await {
                            return Ok(());
                        }
                    }
                    None => err_open = false,
                },
                _ = shutdown.recv() => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!(error = %e, "Failed to stop log command");
                    }
                    return Ok(());
                }
            }
        }

        let status = child.wait().await?;
        Err(IngestError::SourceClosed(format!(
            "`{}` exited with {}",
            self.describe(),
            status
        )))
    }
}
