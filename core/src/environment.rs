//! Injected dependencies for pricing.

use chrono::{DateTime, Utc};

/// Clock trait - abstracts time operations for testability
///
/// The pricing strategy stamps every discount context with the clock's time.
///
/// # Examples
///
/// ```
/// use cinema_pricing_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let before = clock.now();
/// assert!(clock.now() >= before);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
