//! Shared helpers for newline-delimited byte streams.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{broadcast, mpsc};

use crate::error::IngestError;

/// Decode, trim and forward one raw line.
///
/// Blank lines are dropped here. Returns `false` once the pipeline has
/// gone away.
pub async fn forward_line(tx: &mpsc::Sender<String>, raw: &[u8]) -> bool {
    let decoded = String::from_utf8_lossy(raw);
    let line = decoded.trim();
    if line.is_empty() {
        return true;
    }
    tx.send(line.to_string()).await.is_ok()
}

/// How a stream pump ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEnd {
    Eof,
    ReceiverClosed,
    Shutdown,
}

/// Forward every line of `reader` until EOF, receiver drop or shutdown.
pub async fn pump_lines<R>(
    reader: R,
    tx: &mpsc::Sender<String>,
    shutdown: &mut broadcast::Receiver<()>,
) -> Result<PumpEnd, IngestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut segments = reader.split(b'\n');
    loop {
        tokio::select! {
            segment = segments.next_segment() => match segment? {
                Some(raw) => {
                    if !forward_line(tx, &raw).await {
                        return Ok(PumpEnd::ReceiverClosed);
                    }
                }
                None => return Ok(PumpEnd::Eof),
            },
            _ = shutdown.recv() => return Ok(PumpEnd::Shutdown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pump_strips_and_filters() {
        let input: &[u8] = b"pool=blue\r\n\n   \npool=green\npartial";
        let (tx, mut rx) = mpsc::channel(8);
        let (_shutdown_tx, mut shutdown_rx) = broadcast::channel(1);

        let end = pump_lines(input, &tx, &mut shutdown_rx).await.unwrap();
        assert_eq!(end, PumpEnd::Eof);
        drop(tx);

        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            lines.push(line);
        }
        assert_eq!(lines, vec!["pool=blue", "pool=green", "partial"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_fatal() {
        let (tx, mut rx) = mpsc::channel(1);
        assert!(forward_line(&tx, b"pool=blue \xff").await);
        assert_eq!(rx.recv().await.unwrap(), "pool=blue \u{fffd}");
    }
}
