//! Platform-neutral surface of the upstream star-graph API.
//!
//! The aggregation engine depends only on this module: the
//! [`StarGraphClient`] capability trait, the [`PlatformError`] taxonomy, and
//! the process-wide rate-limit bookkeeping. Concrete adapters (currently
//! GitHub) live in their own modules and convert into these types at the
//! boundary.

mod errors;
mod rate_limit;
mod types;

pub use errors::{PlatformError, Result};
pub use rate_limit::{ApiRateLimiter, RateLimitGuard};
pub use types::{RateLimitInfo, StarGraphClient};
