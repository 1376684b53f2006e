//! Core types for news-digest

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated topic to search news for
///
/// Surrounding whitespace is trimmed; a blank topic cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    topic: String,
}

impl Query {
    /// Create a query from user input
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the topic is empty or whitespace only.
    pub fn new(topic: impl AsRef<str>) -> Result<Self> {
        let topic = topic.as_ref().trim();
        if topic.is_empty() {
            return Err(Error::config("topic must not be empty", "topic"));
        }
        Ok(Self {
            topic: topic.to_string(),
        })
    }

    /// The trimmed topic text
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.topic)
    }
}

impl std::str::FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// One summarized article as returned by the upstream service
///
/// Decoding rejects any object that does not carry exactly these three string fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleSummary {
    /// Headline
    pub title: String,
    /// Short neutral summary
    pub summary: String,
    /// Publication name
    pub source: String,
}

impl ArticleSummary {
    /// Create a new article summary
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            source: source.into(),
        }
    }
}

/// Classification of a failed query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport or HTTP failure after all retries were exhausted
    Network,
    /// Well-formed envelope without any candidates
    EmptyResponse,
    /// First candidate carries no text payload
    MissingContent,
    /// Text payload is not a JSON array of `{title, summary, source}` objects
    MalformedPayload,
}

impl ErrorKind {
    /// Human-readable message shown to the user for this kind of failure
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Could not reach the news service. Please try again later.",
            ErrorKind::EmptyResponse => "No response from the AI. Please try again.",
            ErrorKind::MissingContent => "No news content was returned. Try a different topic.",
            ErrorKind::MalformedPayload => {
                "Failed to parse the news data. The AI may have returned an unexpected format."
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Network => "network",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::MissingContent => "missing_content",
            ErrorKind::MalformedPayload => "malformed_payload",
        };
        f.write_str(s)
    }
}

/// Final result of one query: the articles, or a classified failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Articles in upstream order; may be empty
    Success {
        /// Decoded articles
        articles: Vec<ArticleSummary>,
    },
    /// The query failed at some stage
    Failure {
        /// Stage at which the query failed
        kind: ErrorKind,
        /// Human-readable explanation
        message: String,
    },
}

impl RequestOutcome {
    /// Successful outcome carrying `articles`
    pub fn success(articles: Vec<ArticleSummary>) -> Self {
        RequestOutcome::Success { articles }
    }

    /// Failure with the default message for `kind`
    pub fn failure(kind: ErrorKind) -> Self {
        RequestOutcome::Failure {
            kind,
            message: kind.default_message().to_string(),
        }
    }

    /// Failure with a custom message
    pub fn failure_with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        RequestOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    /// The failure kind, if any
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RequestOutcome::Success { .. } => None,
            RequestOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The decoded articles, if this outcome is a success
    pub fn articles(&self) -> Option<&[ArticleSummary]> {
        match self {
            RequestOutcome::Success { articles } => Some(articles),
            RequestOutcome::Failure { .. } => None,
        }
    }
}

/// Decoded JSON envelope returned by the upstream service
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    /// HTTP status of the successful attempt
    pub status: u16,
    /// Response body decoded as JSON
    pub body: serde_json::Value,
    /// Number of attempts it took to get this response
    pub attempts: u32,
}
