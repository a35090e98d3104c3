//! Active-pool change detection.
//!
//! # States
//! ```text
//! Uninitialized ──first record──▶ Tracking(pool)
//! Tracking(a) ──record from b, cooldown clear──▶ Tracking(b) + failover alert
//! Tracking(a) ──record from b, cooldown active──▶ Tracking(a)   (suppressed)
//! ```
//!
//! A suppressed change leaves the tracked pool stale until the cooldown
//! expires. A blue → green → blue flap inside one cooldown therefore
//! produces no second alert: the detector never saw itself on green.

use chrono::{DateTime, TimeDelta, Utc};

use crate::alert::AlertIntent;
use crate::detect::cooldown_delta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailoverState {
    Uninitialized,
    Tracking(String),
}

/// Result of observing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum FailoverOutcome {
    /// First record seen; establishes the pool without alerting.
    Baseline,
    /// Same pool as before.
    Unchanged,
    /// Pool differs but the last failover alert is too recent.
    Suppressed { candidate: String, elapsed: TimeDelta },
    /// Pool changed and an alert is due.
    Failover(AlertIntent),
}

#[derive(Debug, Clone)]
pub struct FailoverDetector {
    state: FailoverState,
    last_alert_at: Option<DateTime<Utc>>,
    cooldown: TimeDelta,
}

impl FailoverDetector {
    pub fn new(cooldown_secs: u64) -> Self {
        Self {
            state: FailoverState::Uninitialized,
            last_alert_at: None,
            cooldown: cooldown_delta(cooldown_secs),
        }
    }

    pub fn state(&self) -> &FailoverState {
        &self.state
    }

    pub fn current_pool(&self) -> Option<&str> {
        match &self.state {
            FailoverState::Uninitialized => None,
            FailoverState::Tracking(pool) => Some(pool),
        }
    }

    pub fn last_alert_at(&self) -> Option<DateTime<Utc>> {
        self.last_alert_at
    }

    pub fn observe(&mut self, pool: &str, now: DateTime<Utc>) -> FailoverOutcome {
        let current = match &self.state {
            FailoverState::Uninitialized => None,
            FailoverState::Tracking(current) if current == pool => {
                return FailoverOutcome::Unchanged;
            }
            FailoverState::Tracking(current) => Some(current.clone()),
        };

        let Some(current) = current else {
            tracing::info!(pool, "Initial pool detected");
            self.state = FailoverState::Tracking(pool.to_string());
            return FailoverOutcome::Baseline;
        };

        if let Some(last) = self.last_alert_at {
            let elapsed = now - last;
            if elapsed < self.cooldown {
                tracing::info!(
                    from = %current,
                    to = pool,
                    elapsed_secs = elapsed.num_seconds(),
                    cooldown_secs = self.cooldown.num_seconds(),
                    "Failover cooldown active"
                );
                return FailoverOutcome::Suppressed {
                    candidate: pool.to_string(),
                    elapsed,
                };
            }
        }

        self.last_alert_at = Some(now);
        self.state = FailoverState::Tracking(pool.to_string());
        FailoverOutcome::Failover(AlertIntent::Failover {
            from_pool: current,
            to_pool: pool.to_string(),
            timestamp: now,
        })
    }
}
