//! High-level client: topic in, [`RequestOutcome`] out

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::{HttpTransport, RequestExecutor, Transport};
use crate::payload::build_payload;
use crate::response;
use crate::types::{ErrorKind, Query, RequestOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Fetches news summaries for a topic
///
/// Wires payload construction, [`RequestExecutor`], and [`response::parse`]
/// together. Cheap to clone and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct NewsClient {
    config: Arc<Config>,
    executor: RequestExecutor,
}

impl NewsClient {
    /// Create a client talking HTTP to the configured endpoint
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid, or
    /// [`Error::Other`] if the HTTP client cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(&config.api)?);
        Ok(Self::build(config, transport))
    }

    /// Create a client over a custom transport
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, transport))
    }

    fn build(config: Config, transport: Arc<dyn Transport>) -> Self {
        let executor = RequestExecutor::new(
            transport,
            config.retry.clone(),
            config.api.request_timeout,
        );
        Self {
            config: Arc::new(config),
            executor,
        }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch and parse news for `query`
    ///
    /// Never fails: network exhaustion becomes [`ErrorKind::Network`], and
    /// validation problems become the matching failure kind.
    pub async fn fetch(&self, query: &Query) -> RequestOutcome {
        let payload = build_payload(query, &self.config.prompt);

        let outcome = match self.executor.execute(&payload).await {
            Ok(raw) => response::parse(&raw),
            Err(e) => {
                warn!(topic = %query, error = %e, "news request failed");
                network_failure(&e)
            }
        };

        match &outcome {
            RequestOutcome::Success { articles } => {
                info!(topic = %query, count = articles.len(), "news fetched");
            }
            RequestOutcome::Failure { kind, .. } => {
                info!(topic = %query, kind = %kind, "news request unsuccessful");
            }
        }
        outcome
    }

    /// Validate `topic` and fetch news for it
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the topic is blank; no request is sent.
    pub async fn fetch_topic(&self, topic: &str) -> Result<RequestOutcome> {
        let query = Query::new(topic)?;
        Ok(self.fetch(&query).await)
    }
}

fn network_failure(error: &Error) -> RequestOutcome {
    match error {
        Error::Network { source, .. } => RequestOutcome::failure_with_message(
            ErrorKind::Network,
            format!("{} ({})", ErrorKind::Network.default_message(), source.summary()),
        ),
        other => RequestOutcome::failure_with_message(ErrorKind::Network, other.to_string()),
    }
}
