use std::time::Duration;

use rand::Rng as _;

use hoard_config::Retry;

/// Delay to wait after failed attempt number `attempt` (1-based).
///
/// Exponential from `base_delay_ms`, capped at `max_delay_ms`. With jitter the delay is drawn
/// uniformly from zero up to the capped value.
pub fn backoff_delay(policy: &Retry, attempt: u32) -> Duration {
	let exponent = attempt.saturating_sub(1).min(32);
	let uncapped = policy.base_delay_ms.saturating_mul(1_u64 << exponent);
	let capped = uncapped.min(policy.max_delay_ms);
	let millis = if policy.jitter && capped > 0 { rand::rng().random_range(0..=capped) } else { capped };

	Duration::from_millis(millis)
}
