//! Mock upstream fixtures: envelopes and configs pointing at a wiremock server

use news_digest::response::encode_articles;
use news_digest::{ArticleSummary, Config, RetryConfig};
use std::time::Duration;
use wiremock::MockServer;

/// Path the mock upstream serves `generateContent` on
pub const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

/// Key the tests configure and expect to see forwarded
pub const TEST_API_KEY: &str = "test-key-123";

/// Config targeting `server` with a fast baseline retry schedule
pub fn config_for(server: &MockServer, max_attempts: u32) -> Config {
    let mut config = Config::default();
    config.api.endpoint = format!("{}{}", server.uri(), GENERATE_PATH);
    config.api.api_key = Some(TEST_API_KEY.to_string());
    config.api.request_timeout = Duration::from_secs(5);
    config.retry = RetryConfig::new(max_attempts, Duration::from_millis(10));
    config
}

/// Upstream envelope whose first candidate carries `text`
pub fn envelope_with_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP",
            "groundingMetadata": {
                "webSearchQueries": ["latest news"]
            }
        }],
        "modelVersion": "test-model"
    })
}

/// Upstream envelope carrying `articles` as its text payload
pub fn articles_envelope(articles: &[ArticleSummary]) -> serde_json::Value {
    envelope_with_text(&encode_articles(articles).expect("articles encode"))
}

/// A few distinct articles in a fixed order
pub fn sample_articles() -> Vec<ArticleSummary> {
    vec![
        ArticleSummary::new(
            "Grid-scale batteries pass 100 GW",
            "Installations doubled year over year.",
            "Energy Weekly",
        ),
        ArticleSummary::new(
            "Offshore wind auction clears",
            "Three new sites were awarded.",
            "Harbor Gazette",
        ),
        ArticleSummary::new(
            "Solar tariffs revised",
            "Import duties were cut by half.",
            "Trade Desk",
        ),
    ]
}
