//! Retry policy for transient upstream failures.
//!
//! Only network-level failures are retried, and only a couple of times with
//! a short jittered backoff. Rate-limit and auth failures are never retried
//! here; they surface immediately so the caller can decide what to do.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Backoff for transient transport failures: short, jittered, bounded.
#[must_use]
pub fn transient_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(250))
        .with_max_delay(Duration::from_secs(5))
        .with_max_times(2)
        .with_jitter()
}
