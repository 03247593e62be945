//! HTTP and retry tuning constants.
//!
//! These defaults apply when the caller does not override them through
//! [`crate::client::ApiClientBuilder`] or a custom [`crate::RetryPolicy`].

use std::time::Duration;

/// Maximum time to wait for a single HTTP request to complete.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Initial delay before the first retry attempt.
pub const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Maximum delay between retry attempts.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Multiplier for exponential backoff (delay doubles each retry).
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Maximum number of retry attempts after the initial request.
pub const MAX_RETRIES: u32 = 3;

/// Idle connections kept per host in the connection pool.
pub const POOL_MAX_IDLE_PER_HOST: usize = 10;
