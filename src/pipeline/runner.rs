//! Async driver for the [`Watcher`].

use tokio::sync::{broadcast, mpsc};

use crate::alert::AlertSink;
use crate::pipeline::watcher::{Watcher, WatcherStats};

/// Feed lines into `watcher` until the source closes or shutdown fires.
///
/// The watcher is moved in and handed back so the caller can drop its sink
/// (closing the alert queue) once processing is over.
pub async fn run_pipeline<S: AlertSink>(
    mut watcher: Watcher<S>,
    mut lines: mpsc::Receiver<String>,
    mut shutdown: broadcast::Receiver<()>,
) -> Watcher<S> {
    tracing::info!("Monitoring started, waiting for traffic");

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => {
                    watcher.process_line(&line);
                }
                None => {
                    tracing::info!("Log source finished");
                    break;
                }
            },
            _ = shutdown.recv() => {
                tracing::info!("Pipeline received shutdown signal");
                break;
            }
        }
    }

    let WatcherStats { lines, records, alerts_emitted, alerts_admitted } = watcher.stats();
    tracing::info!(lines, records, alerts_emitted, alerts_admitted, "Pipeline stopped");
    watcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertIntent;
    use crate::clock::SystemClock;
    use crate::config::DetectionConfig;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_processes_every_line_in_order_until_close() {
        let watcher: Watcher<Vec<AlertIntent>> =
            Watcher::new(&DetectionConfig::default(), Arc::new(SystemClock), Vec::new());
        let (tx, rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

        for pool in ["blue", "blue", "green"] {
            tx.send(format!("pool={pool} upstream_status=200")).await.unwrap();
        }
        drop(tx);

        let watcher = run_pipeline(watcher, rx, shutdown_rx).await;
        assert_eq!(watcher.stats().records, 3);
        assert_eq!(watcher.current_pool(), Some("green"));
        assert_eq!(watcher.sink().len(), 1);
    }
}
