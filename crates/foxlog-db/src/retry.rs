//! Retry policy for the initial connection check.
//!
//! Only the first `ping` is retried. Once the server has answered, every
//! bootstrap step runs exactly once; a failed run is simply re-run by the
//! operator since all steps are idempotent.

use std::time::Duration;

use foxlog_config::MongoConfig;
use mongodb::error::{Error as MongoError, ErrorKind};

/// Configuration for retry behavior on transient connection errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl From<&MongoConfig> for RetryConfig {
    fn from(config: &MongoConfig) -> Self {
        Self {
            max_attempts: config.connect_attempts.max(1),
            base_delay: config.retry_base_delay(),
            max_delay: config.retry_max_delay(),
        }
    }
}

impl RetryConfig {
    /// Delay before retrying after failed attempt number `attempt` (1-based).
    ///
    /// Doubles from `base_delay` and is capped at `max_delay`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1 << exponent)
            .min(self.max_delay)
    }

    /// Whether another attempt is allowed after `attempt` failed.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Detect connection errors that may clear up on their own.
///
/// Server selection timeouts, socket errors and cleared pools are transient.
/// Authentication failures and command errors are not retried.
#[must_use]
pub fn is_transient_connect_error(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. }
    )
}
