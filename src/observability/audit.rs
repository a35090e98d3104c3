//! Local audit trail of emitted alerts.
//!
//! One event per alert intent on the `bluegreen_watcher::audit` target,
//! written before the maintenance gate and before delivery, so the record
//! exists whether or not the notification ever leaves the process.

use crate::alert::AlertIntent;
use crate::observability::metrics;

pub const AUDIT_TARGET: &str = "bluegreen_watcher::audit";

pub fn record_emitted(alert: &AlertIntent, maintenance_mode: bool) {
    metrics::record_alert(alert.kind(), metrics::AlertOutcome::Emitted);

    let payload = serde_json::to_string(alert).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
    tracing::info!(
        target: AUDIT_TARGET,
        kind = %alert.kind(),
        severity = alert.severity().color(),
        maintenance_mode,
        alert = %payload,
        "Alert emitted"
    );
}
