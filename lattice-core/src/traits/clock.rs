use chrono::{DateTime, Utc};

/// Time source for cache TTL decisions. Injected so expiry is testable.
pub trait IClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl IClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
