//! # news-digest
//!
//! Topic-driven news summaries from a search-grounded generative AI endpoint.
//!
//! ## Design Philosophy
//!
//! news-digest is designed to be:
//! - **Small core** - a retrying request executor and a response validator
//! - **Classified failures** - every query ends in one [`RequestOutcome`], never a panic
//! - **Library-first** - rendering belongs to the caller
//! - **Sensible defaults** - 5 attempts, 1s initial backoff doubling each time
//!
//! ## Quick Start
//!
//! ```no_run
//! use news_digest::{Config, NewsClient, RequestOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.api.api_key = std::env::var("NEWS_DIGEST_API_KEY").ok();
//!
//!     let client = NewsClient::new(config)?;
//!
//!     match client.fetch_topic("renewable energy").await? {
//!         RequestOutcome::Success { articles } => {
//!             for article in articles {
//!                 println!("{} ({})\n  {}", article.title, article.source, article.summary);
//!             }
//!         }
//!         RequestOutcome::Failure { kind, message } => {
//!             eprintln!("{kind}: {message}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// High-level news client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Request execution with retry and backoff
pub mod executor;
/// Request body construction
pub mod payload;
/// Response validation and parsing
pub mod response;
/// Retry logic with exponential backoff
pub mod retry;
/// UI-facing search session state
pub mod session;
/// Core types
pub mod types;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use client::NewsClient;
pub use config::{ApiConfig, Config, PromptConfig, RetryConfig};
pub use error::{Error, NetworkError, Result};
pub use executor::{HttpReply, HttpTransport, RequestExecutor, Transport};
pub use session::{SearchSession, SearchState, Ticket};
pub use types::{ArticleSummary, ErrorKind, Query, RawResponse, RequestOutcome};
