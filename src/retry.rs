//! Retry with exponential backoff for idempotent E-utilities requests

use std::future::Future;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

/// Errors that can tell whether repeating the request may succeed
pub trait RetryableError {
    fn is_retryable(&self) -> bool;

    /// Short human-readable cause, used in retry logs
    fn retry_reason(&self) -> &str;
}

/// Backoff policy for transient transport failures
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: usize,
    /// Delay before the first retry; doubles on every further retry
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(16),
        }
    }

    /// A policy that gives up after the first failure
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::new()
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delays between attempts, before jitter is applied
    ///
    /// `ExponentialBackoff::from_millis(2)` yields 2, 4, 8, ... so the factor
    /// is half the initial delay.
    pub(crate) fn delays(&self) -> impl Iterator<Item = Duration> {
        let factor = (self.initial_delay.as_millis() as u64 / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.max_delay)
            .take(self.max_retries)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. The last error is returned in the latter two cases.
pub async fn with_retry<T, E, F, Fut>(
    operation: F,
    config: &RetryConfig,
    description: &str,
) -> Result<T, E>
where
    E: RetryableError,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let strategy = config.delays().map(jitter);

    RetryIf::start(strategy, operation, |err: &E| {
        let retry = err.is_retryable();
        if retry {
            warn!(reason = err.retry_reason(), "{} failed, retrying", description);
        }
        retry
    })
    .await
}
