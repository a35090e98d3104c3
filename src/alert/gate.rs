//! Maintenance-mode gate in front of the notifier.
//!
//! Stateless: the decision depends only on the configured flag. Cooldowns
//! are enforced earlier, by the detectors.

use crate::alert::types::AlertIntent;
use crate::observability::metrics;

/// Result of passing an intent through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// Forward to the notifier.
    Send(AlertIntent),
    /// Dropped because maintenance mode is on.
    Suppressed(AlertIntent),
}

impl Admission {
    pub fn is_sendable(&self) -> bool {
        matches!(self, Admission::Send(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlertGate {
    maintenance_mode: bool,
}

impl AlertGate {
    pub fn new(maintenance_mode: bool) -> Self {
        Self { maintenance_mode }
    }

    pub fn maintenance_mode(&self) -> bool {
        self.maintenance_mode
    }

    pub fn admit(&self, alert: AlertIntent) -> Admission {
        if self.maintenance_mode {
            tracing::info!(kind = %alert.kind(), "Maintenance mode: suppressing alert");
            metrics::record_alert(alert.kind(), metrics::AlertOutcome::SuppressedMaintenance);
            Admission::Suppressed(alert)
        } else {
            Admission::Send(alert)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn alerts() -> Vec<AlertIntent> {
        let now = Utc::now();
        vec![
            AlertIntent::Failover { from_pool: "blue".into(), to_pool: "green".into(), timestamp: now },
            AlertIntent::ErrorRate {
                error_rate: 3.0,
                error_count: 3,
                total: 100,
                threshold_percent: 2.0,
                window_size: 200,
                timestamp: now,
            },
            AlertIntent::Recovery { error_rate: 0.5, timestamp: now },
        ]
    }

    #[test]
    fn test_maintenance_suppresses_every_kind() {
        let gate = AlertGate::new(true);
        for alert in alerts() {
            assert_eq!(gate.admit(alert.clone()), Admission::Suppressed(alert));
        }
    }

    #[test]
    fn test_passes_through_unchanged() {
        let gate = AlertGate::new(false);
        for alert in alerts() {
            let admission = gate.admit(alert.clone());
            assert!(admission.is_sendable());
            assert_eq!(admission, Admission::Send(alert));
        }
    }
}
