//! Request body construction
//!
//! Builds the `generateContent` body for a [`Query`]: the instruction text with
//! the topic filled in, an optional search-grounding tool, and an optional
//! response MIME type constraint.

use crate::config::{PromptConfig, TOPIC_PLACEHOLDER};
use crate::types::Query;
use serde_json::{Map, Value};

/// Fill the instruction template with the query topic
pub fn render_prompt(query: &Query, prompt: &PromptConfig) -> String {
    prompt
        .instruction_template
        .replace(TOPIC_PLACEHOLDER, query.topic())
}

/// Build the upstream request body for `query`
///
/// `tools` is present only with grounding on, `generationConfig` only when a
/// response MIME type is configured.
pub fn build_payload(query: &Query, prompt: &PromptConfig) -> Value {
    let part = object([("text", Value::String(render_prompt(query, prompt)))]);
    let content = object([("parts", Value::Array(vec![part]))]);

    let mut request = Map::new();
    request.insert("contents".to_string(), Value::Array(vec![content]));
    if prompt.grounding {
        let tool = object([("google_search", Value::Object(Map::new()))]);
        request.insert("tools".to_string(), Value::Array(vec![tool]));
    }
    if let Some(mime_type) = &prompt.response_mime_type {
        request.insert(
            "generationConfig".to_string(),
            object([("responseMimeType", Value::String(mime_type.clone()))]),
        );
    }

    Value::Object(request)
}

fn object<const N: usize>(fields: [(&str, Value); N]) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}
