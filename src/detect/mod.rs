//! Stream detectors.
//!
//! # Data Flow
//! ```text
//! RequestRecord
//!     → window.rs (append, evict oldest beyond capacity)
//!     → failover.rs (pool changed? cooldown gated)
//!     → error_rate.rs (5xx ratio over whole window, hysteresis + cooldowns)
//!     → AlertIntent(s)
//! ```
//!
//! # Design Decisions
//! - Each detector owns its own state; nothing is global
//! - Detectors take `now` as an argument and never read a clock
//! - Error rate is recomputed from the window every time

pub mod error_rate;
pub mod failover;
pub mod window;

pub use error_rate::{ErrorRateMonitor, ErrorRateOutcome};
pub use failover::{FailoverDetector, FailoverOutcome, FailoverState};
pub use window::SlidingWindow;

use chrono::TimeDelta;

/// Cooldown in seconds as a `TimeDelta`, saturating at `TimeDelta::MAX`.
pub(crate) fn cooldown_delta(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_delta_saturates() {
        assert_eq!(cooldown_delta(300), TimeDelta::seconds(300));
        assert_eq!(cooldown_delta(10u64.pow(16)), TimeDelta::MAX);
        assert_eq!(cooldown_delta(u64::MAX), TimeDelta::MAX);
    }
}
