//! Request execution with retry and backoff
//!
//! [`RequestExecutor`] sends an already-built payload through a [`Transport`],
//! treating every non-success status, transport failure, per-attempt timeout,
//! and non-JSON body as a failed attempt. Failed attempts are retried on the
//! doubling schedule from [`crate::retry`]. A successful response is returned
//! as soon as it arrives, even if it carries no useful content; an empty
//! success body comes back as JSON `null`.

mod transport;

pub use transport::{API_KEY_HEADER, HttpReply, HttpTransport, Transport};

use crate::config::RetryConfig;
use crate::error::{Error, NetworkError, Result};
use crate::retry::with_retry;
use crate::types::RawResponse;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Issues one upstream request, retrying failed attempts with exponential backoff
///
/// Holds no state between calls.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    retry: RetryConfig,
    request_timeout: Duration,
}

impl RequestExecutor {
    /// Create an executor over `transport`
    ///
    /// `request_timeout` bounds each individual attempt.
    pub fn new(transport: Arc<dyn Transport>, retry: RetryConfig, request_timeout: Duration) -> Self {
        Self {
            transport,
            retry,
            request_timeout,
        }
    }

    /// The retry settings used by [`RequestExecutor::execute`]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Send `payload` using the executor's retry settings
    ///
    /// # Errors
    /// Returns [`Error::Network`] carrying the last failure once every attempt
    /// failed, or [`Error::Config`] if the retry settings are invalid.
    pub async fn execute(&self, payload: &serde_json::Value) -> Result<RawResponse> {
        self.run(payload, &self.retry).await
    }

    /// Send `payload` with an explicit attempt count and initial delay
    ///
    /// Jitter and delay cap still come from the executor's retry settings.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `max_attempts` is zero or `initial_delay`
    /// is zero, before any request is sent; otherwise as [`RequestExecutor::execute`].
    pub async fn execute_with(
        &self,
        payload: &serde_json::Value,
        max_attempts: u32,
        initial_delay: Duration,
    ) -> Result<RawResponse> {
        let retry = RetryConfig {
            max_attempts,
            initial_delay,
            ..self.retry.clone()
        };
        self.run(payload, &retry).await
    }

    async fn run(&self, payload: &serde_json::Value, retry: &RetryConfig) -> Result<RawResponse> {
        retry.validate()?;

        let mut attempts: u32 = 0;
        let result = with_retry(retry, || {
            attempts += 1;
            self.attempt(payload, attempts)
        })
        .await;

        match result {
            Ok((status, body)) => Ok(RawResponse {
                status,
                body,
                attempts,
            }),
            Err(source) => Err(Error::Network { attempts, source }),
        }
    }

    async fn attempt(
        &self,
        payload: &serde_json::Value,
        attempt: u32,
    ) -> std::result::Result<(u16, serde_json::Value), NetworkError> {
        debug!(attempt, "sending upstream request");

        let reply = tokio::time::timeout(self.request_timeout, self.transport.post_json(payload))
            .await
            .map_err(|_| NetworkError::Timeout(self.request_timeout))??;

        if !reply.is_success() {
            return Err(NetworkError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        // No body (204, or 200 with nothing in it) is left to the validator
        let body = if reply.body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&reply.body)
                .map_err(|e| NetworkError::InvalidBody(e.to_string()))?
        };

        debug!(attempt, status = reply.status, "upstream request succeeded");
        Ok((reply.status, body))
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("retry", &self.retry)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
