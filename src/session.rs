//! Search session state for a UI
//!
//! A UI shows at most one query at a time. [`SearchSession`] keeps that view as a
//! single [`SearchState`] value instead of separate loading/error/results flags,
//! and drops outcomes of queries that a newer query has superseded. In-flight
//! requests are not cancelled; their outcomes are ignored.

use crate::types::{ArticleSummary, ErrorKind, Query, RequestOutcome};
use tracing::debug;

/// What the UI should currently display
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
    /// No query submitted yet, or the session was reset
    #[default]
    Idle,
    /// A query is in flight
    Loading {
        /// Topic being searched
        topic: String,
    },
    /// The latest query produced articles (possibly none)
    Loaded {
        /// Topic that was searched
        topic: String,
        /// Articles in upstream order
        articles: Vec<ArticleSummary>,
    },
    /// The latest query failed
    Failed {
        /// Topic that was searched
        topic: String,
        /// Stage at which the query failed
        kind: ErrorKind,
        /// Message to show the user
        message: String,
    },
}

impl SearchState {
    /// Whether a query is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }
}

/// Handle identifying one submitted query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Tracks the latest query and the state to display for it
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    current: Option<Ticket>,
    next_id: u64,
}

impl SearchSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state to display
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a query, superseding any query still in flight
    pub fn begin(&mut self, query: &Query) -> Ticket {
        self.next_id += 1;
        let ticket = Ticket(self.next_id);
        if let Some(previous) = self.current.replace(ticket) {
            if self.state.is_loading() {
                debug!(superseded = previous.0, "query superseded by a newer one");
            }
        }
        self.state = SearchState::Loading {
            topic: query.topic().to_string(),
        };
        ticket
    }

    /// Apply the outcome of the query identified by `ticket`
    ///
    /// Returns `false` and leaves the state untouched if `ticket` is not the
    /// latest query, or if its outcome was already applied.
    pub fn complete(&mut self, ticket: Ticket, outcome: RequestOutcome) -> bool {
        if self.current != Some(ticket) || !self.state.is_loading() {
            debug!(ticket = ticket.0, "ignoring stale outcome");
            return false;
        }

        let topic = match std::mem::take(&mut self.state) {
            SearchState::Loading { topic } => topic,
            _ => String::new(),
        };
        self.state = match outcome {
            RequestOutcome::Success { articles } => SearchState::Loaded { topic, articles },
            RequestOutcome::Failure { kind, message } => SearchState::Failed {
                topic,
                kind,
                message,
            },
        };
        true
    }

    /// Return to [`SearchState::Idle`]; outcomes of earlier tickets are ignored afterwards
    pub fn reset(&mut self) {
        self.current = None;
        self.state = SearchState::Idle;
    }
}
