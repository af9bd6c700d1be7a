use std::env;
use std::time::Duration;

/// Tunables for [`Allocator`](crate::service::Allocator).
///
/// # Environment Variables
///
/// - `ALLOC_MAX_ATTEMPTS`: bounded retries of the read-max-then-insert
///   sequence after a duplicate-key race (default 3)
/// - `ALLOC_LOCK_TIMEOUT_MS`: how long an allocation may wait for the
///   per-category lock before failing with `Busy` (default 5000)
#[derive(Clone, Debug)]
pub struct AllocatorConfig {
    pub max_attempts: u32,
    pub lock_timeout: Duration,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            lock_timeout: Duration::from_secs(5),
        }
    }
}

impl AllocatorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env::var("ALLOC_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_attempts),
            lock_timeout: env::var("ALLOC_LOCK_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.lock_timeout),
        }
    }
}
