//! Hand-off point between the synchronous pipeline and alert delivery.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::alert::types::AlertIntent;
use crate::observability::metrics;

/// Receives admitted alerts from the pipeline.
///
/// Must not block: the pipeline calls it inline while processing a line.
pub trait AlertSink {
    fn deliver(&mut self, alert: AlertIntent);
}

/// Collects alerts in memory. Used by replays and tests.
impl AlertSink for Vec<AlertIntent> {
    fn deliver(&mut self, alert: AlertIntent) {
        self.push(alert);
    }
}

/// Bounded queue feeding the [`Dispatcher`](crate::alert::dispatcher::Dispatcher).
///
/// A full queue drops the notification, never the line.
#[derive(Debug, Clone)]
pub struct DispatchQueue {
    tx: mpsc::Sender<AlertIntent>,
}

/// Create a queue and the receiver the dispatcher consumes.
pub fn dispatch_queue(capacity: usize) -> (DispatchQueue, mpsc::Receiver<AlertIntent>) {
    let (tx, rx) = mpsc::channel(capacity);
    (DispatchQueue { tx }, rx)
}

impl AlertSink for DispatchQueue {
    fn deliver(&mut self, alert: AlertIntent) {
        match self.tx.try_send(alert) {
            Ok(()) => {}
            Err(TrySendError::Full(alert)) => {
                tracing::warn!(kind = %alert.kind(), "Alert queue full, dropping notification");
                metrics::record_alert(alert.kind(), metrics::AlertOutcome::Dropped);
            }
            Err(TrySendError::Closed(alert)) => {
                tracing::warn!(kind = %alert.kind(), "Dispatcher gone, dropping notification");
                metrics::record_alert(alert.kind(), metrics::AlertOutcome::Dropped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recovery() -> AlertIntent {
        AlertIntent::Recovery { error_rate: 0.1, timestamp: Utc::now() }
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (mut queue, mut rx) = dispatch_queue(1);
        queue.deliver(recovery());
        queue.deliver(recovery());

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_queue_is_harmless() {
        let (mut queue, rx) = dispatch_queue(4);
        drop(rx);
        queue.deliver(recovery());
    }
}
