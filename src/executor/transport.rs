//! Transport seam between the executor and the network

use crate::config::ApiConfig;
use crate::error::{Error, NetworkError, Result};
use async_trait::async_trait;

/// Header carrying the API key, when one is configured
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Status and raw body of one HTTP exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpReply {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request payload upstream
///
/// Implementations perform a single exchange with no retry of their own;
/// retries, timeouts, and status classification belong to
/// [`super::RequestExecutor`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `payload` as JSON and return whatever the server answered
    ///
    /// # Errors
    /// Returns [`NetworkError::Transport`] if no HTTP answer was received.
    async fn post_json(
        &self,
        payload: &serde_json::Value,
    ) -> std::result::Result<HttpReply, NetworkError>;
}

/// Production transport backed by `reqwest`
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the configured endpoint
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("news-digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint: api.endpoint.clone(),
            api_key: api.api_key.clone(),
        })
    }

    /// The endpoint this transport posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        payload: &serde_json::Value,
    ) -> std::result::Result<HttpReply, NetworkError> {
        let mut request = self.http_client.post(&self.endpoint).json(payload);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpReply { status, body })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
