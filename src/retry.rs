//! Exponential backoff for remote locale fetches.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times to try a fetch and how long to wait between tries.
///
/// The wait before the n-th retry is `initial_delay * backoff_multiplier^(n-1)`,
/// never more than `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total tries, the first one included
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Doubling backoff capped at 5s.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }

    /// Three tries, waiting 250ms then 500ms. A player switching language
    /// should not sit through more than a second of retries.
    pub fn locale_fetch() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        }
    }

    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Wait before `attempt` (1-based). The first attempt never waits.
    fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }

        let factor = self.backoff_multiplier.powi(attempt as i32 - 2);
        Duration::try_from_secs_f64(self.initial_delay.as_secs_f64() * factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::locale_fetch()
    }
}

/// Run `operation` until it succeeds, `should_retry` rejects the error, or
/// `config.max_attempts` is used up. The last error is returned.
///
/// A `max_attempts` of 0 still runs the operation once.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let delay = config.delay_before(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: waiting {:?} before attempt {}/{}",
                operation_name, delay, attempt, max_attempts
            );
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{}: ok on attempt {}/{}", operation_name, attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(error) => error,
        };

        if !should_retry(&error) {
            debug!("{}: giving up, not retryable: {}", operation_name, error);
            return Err(error);
        }
        if attempt >= max_attempts {
            warn!(
                "{}: failed after {} attempts: {}",
                operation_name, max_attempts, error
            );
            return Err(error);
        }

        warn!(
            "{}: attempt {}/{} failed: {}",
            operation_name, attempt, max_attempts, error
        );
        attempt += 1;
    }
}
