//! Alert intents produced by the detectors.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Alert category. Each category has its own cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Failover,
    ErrorRate,
    Recovery,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Failover => "failover",
            AlertKind::ErrorRate => "error_rate",
            AlertKind::Recovery => "recovery",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attachment color understood by Slack-compatible webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Danger,
    Good,
}

impl Severity {
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Good => "good",
        }
    }
}

/// Something worth telling an operator about.
///
/// Intents are fire-and-forget: once emitted, detector state has already
/// been updated regardless of whether delivery succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertIntent {
    /// Traffic moved from one pool to another.
    Failover {
        from_pool: String,
        to_pool: String,
        timestamp: DateTime<Utc>,
    },
    /// 5xx ratio over the window exceeded the threshold.
    ErrorRate {
        error_rate: f64,
        error_count: usize,
        total: usize,
        threshold_percent: f64,
        window_size: usize,
        timestamp: DateTime<Utc>,
    },
    /// 5xx ratio fell back below half the threshold after an error alert.
    Recovery {
        error_rate: f64,
        timestamp: DateTime<Utc>,
    },
}

impl AlertIntent {
    pub fn kind(&self) -> AlertKind {
        match self {
            AlertIntent::Failover { .. } => AlertKind::Failover,
            AlertIntent::ErrorRate { .. } => AlertKind::ErrorRate,
            AlertIntent::Recovery { .. } => AlertKind::Recovery,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AlertIntent::Failover { .. } | AlertIntent::ErrorRate { .. } => Severity::Danger,
            AlertIntent::Recovery { .. } => Severity::Good,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            AlertIntent::Failover { timestamp, .. }
            | AlertIntent::ErrorRate { timestamp, .. }
            | AlertIntent::Recovery { timestamp, .. } => *timestamp,
        }
    }
}
