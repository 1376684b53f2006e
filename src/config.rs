//! Configuration types for news-digest

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder in [`PromptConfig::instruction_template`] replaced by the query topic
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Upstream API settings (endpoint, credentials, per-attempt timeout)
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full URL of the `generateContent` endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key forwarded verbatim as the `x-goog-api-key` header (None = no header)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on a single attempt, including reading the body (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_ms_serde")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            request_timeout: default_request_timeout(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Retry behavior for upstream requests
///
/// The defaults reproduce the baseline schedule: 5 attempts in total, waiting
/// 1s, 2s, 4s, 8s between them, with no jitter and no cap. Setting `jitter` or
/// `max_delay` deviates from that baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each later attempt (default: 1000 ms)
    #[serde(default = "default_initial_delay", with = "duration_ms_serde")]
    pub initial_delay: Duration,

    /// Optional cap on a single delay (default: None, uncapped)
    #[serde(default, with = "optional_duration_ms_serde")]
    pub max_delay: Option<Duration>,

    /// Add up to 100% random extra delay to each wait (default: false)
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: None,
            jitter: false,
        }
    }
}

impl RetryConfig {
    /// Baseline schedule with explicit attempt count and initial delay
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            ..Self::default()
        }
    }

    /// Check the retry bounds
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `max_attempts` is zero or a delay is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::config(
                "max_attempts must be at least 1",
                "retry.max_attempts",
            ));
        }
        if self.initial_delay.is_zero() {
            return Err(Error::config(
                "initial_delay must be greater than zero",
                "retry.initial_delay",
            ));
        }
        if self.max_delay.is_some_and(|d| d.is_zero()) {
            return Err(Error::config(
                "max_delay must be greater than zero when set",
                "retry.max_delay",
            ));
        }
        Ok(())
    }
}

/// Request body settings; the instruction text is configuration data
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Instruction sent to the model; must contain `{topic}`
    #[serde(default = "default_instruction_template")]
    pub instruction_template: String,

    /// Ask the upstream service to ground its answer with a search index (default: true)
    #[serde(default = "default_true")]
    pub grounding: bool,

    /// Response MIME type constraint (default: "application/json", None = omit)
    #[serde(default = "default_response_mime_type")]
    pub response_mime_type: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instruction_template: default_instruction_template(),
            grounding: true,
            response_mime_type: default_response_mime_type(),
        }
    }
}

/// Main configuration for [`crate::NewsClient`]
///
/// Every field has a default, so an empty JSON object deserializes into a
/// usable configuration pointing at the public endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry behavior
    #[serde(default)]
    pub retry: RetryConfig,

    /// Prompt construction
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl Config {
    /// Parse a configuration from a JSON document
    ///
    /// # Errors
    /// Returns [`Error::Serialization`] on malformed JSON and [`Error::Config`]
    /// if the parsed values fail [`Config::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all settings before any request is made
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.api.endpoint)
            .map_err(|e| Error::config(format!("invalid endpoint URL: {e}"), "api.endpoint"))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::config(
                format!("endpoint scheme must be http or https, got {}", endpoint.scheme()),
                "api.endpoint",
            ));
        }
        if self.api.request_timeout.is_zero() {
            return Err(Error::config(
                "request_timeout must be greater than zero",
                "api.request_timeout",
            ));
        }

        self.retry.validate()?;

        if !self.prompt.instruction_template.contains(TOPIC_PLACEHOLDER) {
            return Err(Error::config(
                format!("instruction_template must contain {TOPIC_PLACEHOLDER}"),
                "prompt.instruction_template",
            ));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        .to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(1000)
}

fn default_true() -> bool {
    true
}

fn default_response_mime_type() -> Option<String> {
    Some("application/json".to_string())
}

fn default_instruction_template() -> String {
    concat!(
        "You are a concise news editor. Using up-to-date search results, find the most ",
        "recent and relevant news about \"{topic}\". Respond with ONLY a JSON array of ",
        "objects, each with exactly three string fields: \"title\" (the headline), ",
        "\"summary\" (two or three neutral sentences) and \"source\" (the publication name). ",
        "Do not include any text outside the JSON array."
    )
    .to_string()
}

// Durations are stored as integer milliseconds
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

mod optional_duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.map(Duration::from_millis))
    }
}
