//! Connection Retry Policy
//!
//! Bounded exponential backoff for the initial store connection.

use std::time::Duration;

/// Base delay between connection retries (100ms).
pub const RETRY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on a single retry delay (3s).
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(3);

/// Maximum connection attempts before giving up.
pub const MAX_CONNECT_ATTEMPTS: u32 = 10;

/// Ceiling on total time spent retrying (1 hour).
pub const MAX_RETRY_ELAPSED: Duration = Duration::from_secs(60 * 60);

/// Longest a single connection attempt may wait for a reply (5s).
pub const CONNECT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

// == Retry Policy ==
/// How long to wait between connection attempts, and when to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: u32,
    pub max_elapsed: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: RETRY_BASE_DELAY,
            max_delay: RETRY_MAX_DELAY,
            max_attempts: MAX_CONNECT_ATTEMPTS,
            max_elapsed: MAX_RETRY_ELAPSED,
            attempt_timeout: CONNECT_ATTEMPT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Doubles from `base_delay` and saturates at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = 1u32 << exponent;
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Time allowed for the next attempt, given time already spent.
    ///
    /// Never runs past the total ceiling.
    pub fn attempt_budget(&self, elapsed: Duration) -> Duration {
        self.attempt_timeout.min(self.max_elapsed.saturating_sub(elapsed))
    }

    /// Returns true when another attempt is allowed after `attempt` failures.
    pub fn should_retry(&self, attempt: u32, elapsed: Duration) -> bool {
        attempt < self.max_attempts && elapsed < self.max_elapsed
    }
}
