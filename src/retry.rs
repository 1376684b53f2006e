//! Retry logic with exponential backoff
//!
//! The baseline schedule doubles the delay after every failed attempt:
//! the wait before attempt `i` (zero-based, `i >= 1`) is `initial_delay * 2^(i-1)`.
//! There is no jitter and no cap unless [`RetryConfig::jitter`] or
//! [`RetryConfig::max_delay`] is set.
//!
//! # Example
//!
//! ```no_run
//! use news_digest::retry::{IsRetryable, with_retry};
//! use news_digest::config::RetryConfig;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     Transient,
//!     Permanent,
//! }
//!
//! impl std::fmt::Display for MyError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl IsRetryable for MyError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, MyError::Transient)
//!     }
//! }
//!
//! # async fn example() -> Result<(), MyError> {
//! let config = RetryConfig::default();
//! let result = with_retry(&config, || async {
//!     // Your operation here
//!     Ok::<_, MyError>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::{Error, NetworkError};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for NetworkError {
    fn is_retryable(&self) -> bool {
        // Any failed attempt is retried, including 4xx statuses and bodies that are not JSON
        true
    }
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network { source, .. } => source.is_retryable(),
            Error::Config { .. } => false,
            Error::Serialization(_) => false,
            Error::Other(_) => false,
        }
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// `config.max_attempts` counts every attempt, the first one included. A value
/// of zero behaves like one. Returns as soon as the operation succeeds, or the
/// last error once attempts are exhausted or a non-retryable error occurs.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt + 1 < config.max_attempts => {
                let delay = backoff_delay(config, attempt);
                let delay = if config.jitter { add_jitter(delay) } else { delay };

                tracing::warn!(
                    error = %e,
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Operation failed, retrying"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Operation failed after all retry attempts exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "Operation failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Delay to wait after the failed attempt `attempt_index` (zero-based), before jitter
///
/// Equals `initial_delay * 2^attempt_index`, saturating at `Duration::MAX` and
/// capped by `max_delay` when set.
pub fn backoff_delay(config: &RetryConfig, attempt_index: u32) -> Duration {
    let uncapped = 2u32
        .checked_pow(attempt_index)
        .and_then(|factor| config.initial_delay.checked_mul(factor))
        .unwrap_or(Duration::MAX);

    match config.max_delay {
        Some(cap) => uncapped.min(cap),
        None => uncapped,
    }
}

/// Add random jitter to a delay
///
/// The result is uniformly distributed between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::try_from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
        .unwrap_or(Duration::MAX)
}
