use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

use super::errors::{PlatformError, Result};
use super::types::RateLimitInfo;

/// Type alias for the governor rate limiter.
type GovernorRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// A proactive request pacer using the governor crate.
///
/// Spaces outgoing API calls so bursts of concurrent fan-out fetches do not
/// slam the shared budget. This complements [`RateLimitGuard`], which reacts
/// to the budget the upstream actually reports.
///
/// # Example
///
/// ```ignore
/// use starneighbours::platform::ApiRateLimiter;
///
/// let limiter = ApiRateLimiter::new(10); // 10 requests per second
///
/// // Before each API call:
/// limiter.wait().await;
/// ```
#[derive(Clone)]
pub struct ApiRateLimiter {
    inner: Arc<GovernorRateLimiter>,
}

impl ApiRateLimiter {
    /// Create a new pacer with the specified requests per second.
    ///
    /// A zero rate is clamped to one request per second.
    pub fn new(requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rps));

        Self {
            inner: Arc::new(rate_limiter),
        }
    }

    /// Wait until a request is allowed.
    pub async fn wait(&self) {
        self.inner.until_ready().await;
    }
}

/// Reactive budget guard fed from upstream rate-limit reporting.
///
/// State machine: available -> exhausted -> available. The guard is
/// consulted before every page request; while the budget is exhausted and
/// the reset time has not passed, it fails immediately instead of issuing a
/// request destined for rejection. The transition back to available happens
/// when a later observation carries budget again, or lazily once the reset
/// time passes.
///
/// The guard is process-wide: clones share state, since every concurrent
/// computation draws on the same upstream budget.
#[derive(Clone, Default)]
pub struct RateLimitGuard {
    state: Arc<Mutex<GuardState>>,
}

#[derive(Default)]
struct GuardState {
    exhausted_until: Option<DateTime<Utc>>,
}

impl RateLimitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reset instant the budget is exhausted until, if it is.
    ///
    /// Clears the exhausted state as a side effect once the reset time has
    /// passed.
    #[must_use]
    pub fn blocked_until(&self) -> Option<DateTime<Utc>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match state.exhausted_until {
            Some(reset_at) if Utc::now() < reset_at => Some(reset_at),
            Some(_) => {
                state.exhausted_until = None;
                None
            }
            None => None,
        }
    }

    /// Fail fast with `RateLimited` while the upstream budget is exhausted.
    pub fn check(&self) -> Result<()> {
        match self.blocked_until() {
            Some(reset_at) => Err(PlatformError::RateLimited { reset_at }),
            None => Ok(()),
        }
    }

    /// Record the budget observed on a response (success or failure alike).
    pub fn record(&self, info: &RateLimitInfo) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if info.remaining == 0 {
            state.exhausted_until = Some(info.reset_at);
        } else {
            state.exhausted_until = None;
        }
    }
}
