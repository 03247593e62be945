//! Retry execution with exponential backoff.
//!
//! Retries are opt-in: the executor only loops when the client carries a
//! [`RetryPolicy`]. Only failures classified as retryable (connect errors,
//! per-attempt timeouts, 429 and 5xx statuses) are re-attempted; validation
//! and decode errors fail immediately because retrying cannot fix them.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::constants::{INITIAL_RETRY_DELAY, MAX_RETRIES, MAX_RETRY_DELAY, RETRY_MULTIPLIER};
use crate::error::ApiError;

/// Tuning parameters for the retry loop.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use lakehouse_core::RetryPolicy;
///
/// let policy = RetryPolicy::default()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(200));
/// assert_eq!(policy.max_retries, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial request.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the backoff delay.
    pub max_delay: Duration,
    /// Backoff growth factor between attempts.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            initial_delay: INITIAL_RETRY_DELAY,
            max_delay: MAX_RETRY_DELAY,
            multiplier: RETRY_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Sets the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the upper bound on the backoff delay.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Computes the delay that follows `current` in the backoff sequence.
    ///
    /// The product is clamped to `[0, max_delay]` before conversion, so a
    /// pathological `multiplier` (negative, NaN, infinite) degrades to an
    /// immediate or capped retry instead of panicking.
    fn next_delay(&self, current: Duration) -> Duration {
        let scaled = (current.as_secs_f64() * self.multiplier)
            .max(0.0)
            .min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(scaled)
    }
}

/// Runs `attempt_fn` with backoff retries according to `policy`.
///
/// The closure is invoked once, then up to `max_retries` more times while
/// it keeps failing with a retryable error. The last error is returned
/// when attempts are exhausted.
pub(crate) async fn run_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation: &str,
    attempt_fn: F,
) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut delay = policy.initial_delay;

    for attempt in 0..policy.max_retries {
        match attempt_fn().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() => {
                warn!(
                    operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retryable failure, backing off"
                );
                tokio::time::sleep(delay).await;
                delay = policy.next_delay(delay);
            }
            Err(e) => return Err(e),
        }
    }

    // Final attempt, no backoff budget left.
    attempt_fn().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ConfigError};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn retryable() -> ApiError {
        ClientError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into()
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::default()
            .max_retries(2)
            .initial_delay(Duration::from_millis(1))
    }

    #[test]
    fn test_next_delay_growth_and_cap() {
        let policy = RetryPolicy::default()
            .initial_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(3));
        let second = policy.next_delay(Duration::from_secs(1));
        assert_eq!(second, Duration::from_secs(2));
        let third = policy.next_delay(second);
        assert_eq!(third, Duration::from_secs(3));
        let fourth = policy.next_delay(third);
        assert_eq!(fourth, Duration::from_secs(3));
    }

    #[test]
    fn test_next_delay_tolerates_pathological_multipliers() {
        let negative = RetryPolicy {
            multiplier: -3.0,
            ..RetryPolicy::default()
        };
        assert_eq!(
            negative.next_delay(Duration::from_secs(1)),
            Duration::ZERO
        );

        let nan = RetryPolicy {
            multiplier: f64::NAN,
            ..RetryPolicy::default()
        };
        assert_eq!(nan.next_delay(Duration::from_secs(1)), Duration::ZERO);

        let infinite = RetryPolicy {
            multiplier: f64::INFINITY,
            ..RetryPolicy::default()
        };
        assert_eq!(
            infinite.next_delay(Duration::from_secs(1)),
            infinite.max_delay
        );
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let result = run_with_retry(&fast_policy(), "test_op", || async {
            Ok::<i32, ApiError>(7)
        })
        .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_non_retryable_fails_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = run_with_retry(&fast_policy(), "test_op", move || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<i32, ApiError>(ConfigError::MissingServiceUrl.into())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = run_with_retry(&fast_policy(), "test_op", move || {
            let calls = calls_clone.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(retryable())
                } else {
                    Ok(99)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_backoff_logs_a_warning_per_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = run_with_retry(&fast_policy(), "GET /buckets", move || {
            let calls = calls_clone.clone();
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(retryable())
                } else {
                    Ok(1)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
        assert!(logs_contain("retryable failure, backing off"));
        assert!(logs_contain("GET /buckets"));
    }

    #[tokio::test]
    async fn test_exhausts_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = run_with_retry(&fast_policy(), "test_op", move || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<i32, ApiError>(retryable())
            }
        })
        .await;

        assert!(result.is_err());
        // max_retries backoff attempts + the final attempt = 3 calls
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
