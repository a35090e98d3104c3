//! Asynchronous alert delivery.
//!
//! Owns the notifier and consumes the [`DispatchQueue`](crate::alert::sink::DispatchQueue).
//! Runs beside the pipeline so a slow webhook delays notifications, not
//! line processing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::alert::notifier::Notifier;
use crate::alert::types::AlertIntent;
use crate::error::NotifyError;
use crate::observability::metrics;
use crate::resilience::{retry, with_timeout, RetryPolicy};

/// Counters reported when the dispatcher exits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: u64,
    pub failed: u64,
}

pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    rx: mpsc::Receiver<AlertIntent>,
    policy: RetryPolicy,
    timeout: Duration,
    summary: DispatchSummary,
}

impl Dispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        rx: mpsc::Receiver<AlertIntent>,
        policy: RetryPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            notifier,
            rx,
            policy,
            timeout,
            summary: DispatchSummary::default(),
        }
    }

    /// Deliver alerts until the queue closes or shutdown is signalled.
    ///
    /// On shutdown, alerts already queued get one more delivery pass
    /// bounded by the per-request timeout.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> DispatchSummary {
        tracing::info!(notifier = self.notifier.name(), "Alert dispatcher starting");

        loop {
            // Shutdown first, so a pending signal always takes the bounded drain.
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    self.drain().await;
                    break;
                }
                alert = self.rx.recv() => match alert {
                    Some(alert) => self.dispatch(alert).await,
                    None => break,
                },
            }
        }

        tracing::info!(
            delivered = self.summary.delivered,
            failed = self.summary.failed,
            "Alert dispatcher stopped"
        );
        self.summary
    }

    async fn drain(&mut self) {
        self.rx.close();
        let deadline = self.timeout;
        let drained = tokio::time::timeout(deadline, async {
            while let Some(alert) = self.rx.recv().await {
                self.dispatch(alert).await;
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!("Shutdown deadline reached with alerts still queued");
        }
    }

    async fn dispatch(&mut self, alert: AlertIntent) {
        let notifier = self.notifier.clone();
        let timeout = self.timeout;
        let kind = alert.kind();

        let result = retry(&self.policy, |_| {
            let notifier = notifier.clone();
            let alert = &alert;
            async move {
                with_timeout(timeout, notifier.notify(alert), || {
                    NotifyError::Timeout(timeout.as_secs())
                })
                .await
            }
        })
        .await;

        match result {
            Ok(()) => {
                self.summary.delivered += 1;
                metrics::record_alert(kind, metrics::AlertOutcome::Delivered);
            }
            Err(e) => {
                self.summary.failed += 1;
                metrics::record_alert(kind, metrics::AlertOutcome::Failed);
                tracing::error!(
                    kind = %kind,
                    notifier = self.notifier.name(),
                    error = %e,
                    "Failed to deliver alert"
                );
            }
        }
    }
}
