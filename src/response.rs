//! Validation and parsing of upstream responses
//!
//! A successful HTTP exchange still has to pass three structural checks
//! before it yields articles:
//!
//! 1. the envelope has a non-empty `candidates` array ([`ErrorKind::EmptyResponse`])
//! 2. the first candidate has text at `content.parts[0].text` ([`ErrorKind::MissingContent`])
//! 3. that text is a JSON array of `{title, summary, source}` objects ([`ErrorKind::MalformedPayload`])
//!
//! Parsing is pure: the same input always produces the same [`RequestOutcome`].
//! Field contents are not inspected, and a malformed payload is never partially recovered.

use crate::error::Result;
use crate::types::{ArticleSummary, ErrorKind, RawResponse, RequestOutcome};
use serde_json::Value;
use tracing::debug;

/// Classify and decode a raw upstream response
pub fn parse(raw: &RawResponse) -> RequestOutcome {
    parse_envelope(&raw.body)
}

/// Classify and decode an upstream JSON envelope
pub fn parse_envelope(envelope: &Value) -> RequestOutcome {
    let Some(first) = envelope
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
    else {
        if let Some(reason) = envelope.pointer("/promptFeedback/blockReason") {
            debug!(block_reason = %reason, "upstream returned no candidates");
        } else {
            debug!("upstream returned no candidates");
        }
        return RequestOutcome::failure(ErrorKind::EmptyResponse);
    };

    let Some(text) = extract_text(first) else {
        debug!(
            finish_reason = first.get("finishReason").and_then(|v| v.as_str()),
            "first candidate has no text payload"
        );
        return RequestOutcome::failure(ErrorKind::MissingContent);
    };

    match decode_articles(text) {
        Ok(articles) => {
            debug!(count = articles.len(), "decoded articles");
            RequestOutcome::success(articles)
        }
        Err(e) => {
            debug!(error = %e, "text payload does not match the article schema");
            RequestOutcome::failure(ErrorKind::MalformedPayload)
        }
    }
}

/// Decode a text payload into articles, preserving order
///
/// # Errors
/// Returns an error for malformed JSON, a non-array document, or any element
/// that is not an object with exactly the string fields `title`, `summary`, `source`.
pub fn decode_articles(text: &str) -> serde_json::Result<Vec<ArticleSummary>> {
    serde_json::from_str(text)
}

/// Encode articles into the payload shape [`decode_articles`] accepts
///
/// # Errors
/// Returns [`crate::Error::Serialization`] if encoding fails.
pub fn encode_articles(articles: &[ArticleSummary]) -> Result<String> {
    Ok(serde_json::to_string(articles)?)
}

// An empty string counts as no text
fn extract_text(candidate: &Value) -> Option<&str> {
    candidate
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
