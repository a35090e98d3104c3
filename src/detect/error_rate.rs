//! Upstream 5xx ratio over the sliding window.
//!
//! # Thresholds
//! ```text
//! rate >  threshold      → error alert (cooldown gated)
//! rate <  threshold / 2  → recovery alert, only if an error alert fired
//!                          and 60s < since_error < 2 × cooldown
//!                          (recovery alerts have their own cooldown)
//! otherwise              → nothing
//! ```
//!
//! The last error-alert time is never cleared, so recovery notices are
//! bounded to a single band after each error alert.

use chrono::{DateTime, TimeDelta, Utc};

use crate::alert::AlertIntent;
use crate::detect::cooldown_delta;
use crate::detect::window::SlidingWindow;
use crate::parser::RequestRecord;

/// Fewest records needed before the ratio means anything.
pub const MIN_SAMPLE: usize = 50;

/// Recovery notices are held back for this long after an error alert.
pub const RECOVERY_FLOOR_SECS: i64 = 60;

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorRateOutcome {
    /// Window holds fewer than the minimum sample.
    InsufficientSample { have: usize, need: usize },
    /// Rate between the recovery and alert thresholds, or recovered with
    /// no recovery notice due.
    Steady { error_rate: f64 },
    /// Above threshold but an error alert went out recently.
    ErrorSuppressed { error_rate: f64 },
    /// Above threshold; alert due.
    ErrorAlert(AlertIntent),
    /// Recovered; notice due.
    Recovery(AlertIntent),
}

#[derive(Debug, Clone)]
pub struct ErrorRateMonitor {
    threshold_percent: f64,
    cooldown: TimeDelta,
    last_error_alert_at: Option<DateTime<Utc>>,
    last_recovery_alert_at: Option<DateTime<Utc>>,
}

impl ErrorRateMonitor {
    pub fn new(threshold_percent: f64, cooldown_secs: u64) -> Self {
        Self {
            threshold_percent,
            cooldown: cooldown_delta(cooldown_secs),
            last_error_alert_at: None,
            last_recovery_alert_at: None,
        }
    }

    pub fn last_error_alert_at(&self) -> Option<DateTime<Utc>> {
        self.last_error_alert_at
    }

    pub fn last_recovery_alert_at(&self) -> Option<DateTime<Utc>> {
        self.last_recovery_alert_at
    }

    /// Evaluate the full window as it stands after the latest push.
    pub fn evaluate(&mut self, window: &SlidingWindow, now: DateTime<Utc>) -> ErrorRateOutcome {
        let need = MIN_SAMPLE.min(window.capacity());
        let total = window.len();
        if total < need {
            return ErrorRateOutcome::InsufficientSample { have: total, need };
        }

        let error_count = window.count_matching(RequestRecord::is_upstream_error);
        debug_assert!(error_count <= total);
        let error_rate = error_count as f64 / total as f64 * 100.0;

        if error_rate > self.threshold_percent {
            if self.within_cooldown(self.last_error_alert_at, now) {
                return ErrorRateOutcome::ErrorSuppressed { error_rate };
            }

            self.last_error_alert_at = Some(now);
            return ErrorRateOutcome::ErrorAlert(AlertIntent::ErrorRate {
                error_rate,
                error_count,
                total,
                threshold_percent: self.threshold_percent,
                window_size: window.capacity(),
                timestamp: now,
            });
        }

        if error_rate < self.threshold_percent / 2.0 && self.recovery_due(now) {
            self.last_recovery_alert_at = Some(now);
            return ErrorRateOutcome::Recovery(AlertIntent::Recovery {
                error_rate,
                timestamp: now,
            });
        }

        ErrorRateOutcome::Steady { error_rate }
    }

    fn within_cooldown(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        matches!(last, Some(last) if now - last < self.cooldown)
    }

    fn recovery_due(&self, now: DateTime<Utc>) -> bool {
        let Some(last_error) = self.last_error_alert_at else {
            return false;
        };

        let since_error = now - last_error;
        let in_band = since_error > TimeDelta::seconds(RECOVERY_FLOOR_SECS)
            && since_error < self.cooldown.checked_mul(2).unwrap_or(TimeDelta::MAX);
        if !in_band {
            return false;
        }

        match self.last_recovery_alert_at {
            None => true,
            Some(last_recovery) => now - last_recovery > self.cooldown,
        }
    }
}
