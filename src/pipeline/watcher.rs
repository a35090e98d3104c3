//! Per-line orchestration: parse → window → detectors → gate → sink.

use std::sync::Arc;

use crate::alert::{Admission, AlertGate, AlertIntent, AlertSink};
use crate::clock::Clock;
use crate::config::DetectionConfig;
use crate::detect::{
    ErrorRateMonitor, ErrorRateOutcome, FailoverDetector, FailoverOutcome, SlidingWindow,
};
use crate::observability::{audit, metrics};
use crate::parser::parse_line;

/// What one line amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank or not a proxied request.
    Skipped,
    /// Recorded into the window; `emitted` alerts came out of the
    /// detectors and `admitted` of them went to the sink.
    Recorded { emitted: usize, admitted: usize },
}

/// Running totals since startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatcherStats {
    pub lines: u64,
    pub records: u64,
    pub alerts_emitted: u64,
    pub alerts_admitted: u64,
}

/// The stream-processing state machine.
///
/// Owns the window and every detector; a single task drives it, one line
/// at a time.
pub struct Watcher<S> {
    window: SlidingWindow,
    failover: FailoverDetector,
    error_rate: ErrorRateMonitor,
    gate: AlertGate,
    clock: Arc<dyn Clock>,
    sink: S,
    stats: WatcherStats,
}

impl<S: AlertSink> Watcher<S> {
    pub fn new(config: &DetectionConfig, clock: Arc<dyn Clock>, sink: S) -> Self {
        Self {
            window: SlidingWindow::new(config.window_size),
            failover: FailoverDetector::new(config.cooldown_secs),
            error_rate: ErrorRateMonitor::new(
                config.error_rate_threshold_percent,
                config.cooldown_secs,
            ),
            gate: AlertGate::new(config.maintenance_mode),
            clock,
            sink,
            stats: WatcherStats::default(),
        }
    }

    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Skipped;
        }
        self.stats.lines += 1;
        metrics::record_line();

        let now = self.clock.now();
        let Some(record) = parse_line(line, now) else {
            return LineOutcome::Skipped;
        };
        self.stats.records += 1;
        metrics::record_record();

        let pool = record.pool.clone();
        self.window.push(record);

        let mut intents = Vec::new();
        if let FailoverOutcome::Failover(alert) = self.failover.observe(&pool, now) {
            intents.push(alert);
        }

        match self.error_rate.evaluate(&self.window, now) {
            ErrorRateOutcome::ErrorAlert(alert) | ErrorRateOutcome::Recovery(alert) => {
                metrics::record_error_rate(error_rate_of(&alert));
                intents.push(alert);
            }
            ErrorRateOutcome::Steady { error_rate }
            | ErrorRateOutcome::ErrorSuppressed { error_rate } => {
                metrics::record_error_rate(error_rate);
            }
            ErrorRateOutcome::InsufficientSample { .. } => {}
        }

        let emitted = intents.len();
        let mut admitted = 0;
        for alert in intents {
            audit::record_emitted(&alert, self.gate.maintenance_mode());
            if let Admission::Send(alert) = self.gate.admit(alert) {
                self.sink.deliver(alert);
                admitted += 1;
            }
        }

        self.stats.alerts_emitted += emitted as u64;
        self.stats.alerts_admitted += admitted as u64;
        LineOutcome::Recorded { emitted, admitted }
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn current_pool(&self) -> Option<&str> {
        self.failover.current_pool()
    }

    pub fn stats(&self) -> WatcherStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn error_rate_of(alert: &AlertIntent) -> f64 {
    match alert {
        AlertIntent::ErrorRate { error_rate, .. } | AlertIntent::Recovery { error_rate, .. } => {
            *error_rate
        }
        AlertIntent::Failover { .. } => 0.0,
    }
}
