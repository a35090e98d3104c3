//! Exponential backoff with jitter.

use std::time::Duration;
use rand::Rng;

/// Delay before retry number `attempt` (1-based).
///
/// Doubles from `base` on every attempt, capped at `max`, plus up to 10%
/// jitter so that several watchers do not hammer a webhook in lockstep.
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let factor = 2u32.saturating_pow(attempt - 1);
    let capped = base.saturating_mul(factor).min(max);

    let jitter_ceiling = capped.as_millis() as u64 / 10;
    let jitter = if jitter_ceiling > 0 {
        rand::thread_rng().gen_range(0..jitter_ceiling)
    } else {
        0
    };

    capped + Duration::from_millis(jitter)
}
