//! Metrics collection and exposition.
//!
//! # Metrics
//! - `watcher_lines_total` (counter): non-empty lines received
//! - `watcher_records_total` (counter): lines that produced a request record
//! - `watcher_alerts_total` (counter): alerts by kind and outcome
//! - `watcher_window_error_rate` (gauge): 5xx percentage of the current window
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed, so the core can
//!   be exercised in tests without an exporter
//! - Prometheus endpoint is opt-in

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::alert::AlertKind;

/// What happened to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    Emitted,
    SuppressedMaintenance,
    Delivered,
    Failed,
    Dropped,
}

impl AlertOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            AlertOutcome::Emitted => "emitted",
            AlertOutcome::SuppressedMaintenance => "suppressed_maintenance",
            AlertOutcome::Delivered => "delivered",
            AlertOutcome::Failed => "failed",
            AlertOutcome::Dropped => "dropped",
        }
    }
}

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| e.to_string())?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_line() {
    metrics::counter!("watcher_lines_total").increment(1);
}

pub fn record_record() {
    metrics::counter!("watcher_records_total").increment(1);
}

pub fn record_alert(kind: AlertKind, outcome: AlertOutcome) {
    metrics::counter!(
        "watcher_alerts_total",
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_error_rate(rate: f64) {
    metrics::gauge!("watcher_window_error_rate").set(rate);
}
