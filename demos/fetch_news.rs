//! Fetch news example
//!
//! This example shows the full query lifecycle a UI goes through:
//! - Loading configuration (API key from the environment or a `.env` file)
//! - Starting a query in a `SearchSession`
//! - Fetching and validating the upstream response
//! - Rendering the resulting state as cards or an error banner
//!
//! Run with:
//!
//! ```text
//! NEWS_DIGEST_API_KEY=... cargo run --example fetch_news -- "renewable energy"
//! ```

use news_digest::{Config, NewsClient, Query, SearchSession, SearchState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_digest=info".into()),
        )
        .init();

    let topic = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let query = Query::new(topic)?;

    let mut config = Config::default();
    config.api.api_key = std::env::var("NEWS_DIGEST_API_KEY").ok();
    if let Ok(endpoint) = std::env::var("NEWS_DIGEST_ENDPOINT") {
        config.api.endpoint = endpoint;
    }

    let client = NewsClient::new(config)?;
    let mut session = SearchSession::new();

    let ticket = session.begin(&query);
    render(session.state());

    let outcome = client.fetch(&query).await;
    session.complete(ticket, outcome);
    render(session.state());

    Ok(())
}

fn render(state: &SearchState) {
    match state {
        SearchState::Idle => {}
        SearchState::Loading { topic } => {
            println!("Searching the news for \"{}\"...", topic);
        }
        SearchState::Loaded { topic, articles } if articles.is_empty() => {
            println!("No articles found for \"{}\".", topic);
        }
        SearchState::Loaded { topic, articles } => {
            println!("\nLatest on \"{}\" ({} articles)\n", topic, articles.len());
            for article in articles {
                println!("┌ {}", article.title);
                println!("│ {}", article.summary);
                println!("└ Source: {}\n", article.source);
            }
        }
        SearchState::Failed { kind, message, .. } => {
            eprintln!("✗ {} [{}]", message, kind);
        }
    }
}
