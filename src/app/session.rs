//! Query session state machine.
//!
//! [`SessionState`] is the single source of truth for one search interaction:
//! which query is current, whether it is loading, and what it produced.
//!
//! # State Machine
//!
//! ```text
//!            submit                 resolve
//!   Idle ───────────▶ Loading ───────────────▶ Success
//!    ▲                 │  ▲                       │
//!    │ reset      fail │  │ submit (supersedes)   │ submit
//!    │                 ▼  │                       │
//!    └──────────────  Error ◀─────────────────────┘
//! ```
//!
//! Every state moves to `Loading` on a new submission; there is no terminal
//! state. A resolution is applied only when it belongs to the request that is
//! still in flight for the current query. Anything else is a stale response
//! and is discarded.

use crate::client::RequestTicket;
use crate::domain::SearchResult;
use chrono::{DateTime, Utc};

/// Lifecycle status of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request produced a result.
    Success,
    /// The latest request failed.
    Error,
}

/// Why a completion was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// No request is in flight (session idle, finished, or torn down).
    NotLoading,
    /// A newer submission replaced the request.
    Superseded,
}

/// Outcome of feeding a completion into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session changed state.
    Applied,
    /// The completion was stale and ignored.
    Discarded(DiscardReason),
}

/// State of one search surface.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current_query: String,
    status: SearchStatus,
    result: Option<SearchResult>,
    error_message: Option<String>,
    in_flight: Option<RequestTicket>,
    next_request_id: u64,
    started_at: Option<DateTime<Utc>>,
    last_latency: Option<chrono::Duration>,
}

impl SessionState {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a submitted query and enters `Loading`.
    ///
    /// Clears the previous result and error. Any request already in flight is
    /// superseded by the returned ticket.
    pub fn begin(&mut self, query: String) -> RequestTicket {
        self.next_request_id += 1;
        let ticket = RequestTicket {
            id: self.next_request_id,
            query: query.clone(),
        };

        if let Some(previous) = &self.in_flight {
            tracing::debug!(
                superseded_id = previous.id,
                superseded_query = %previous.query,
                request_id = ticket.id,
                "superseding in-flight search"
            );
        }

        self.current_query = query;
        self.status = SearchStatus::Loading;
        self.result = None;
        self.error_message = None;
        self.in_flight = Some(ticket.clone());
        self.started_at = Some(Utc::now());

        ticket
    }

    /// Applies a successful completion for `ticket`.
    pub fn resolve(&mut self, ticket: &RequestTicket, result: SearchResult) -> Transition {
        if let Err(reason) = self.accepts(ticket) {
            return Transition::Discarded(reason);
        }

        self.finish();
        self.status = SearchStatus::Success;
        self.result = Some(result);
        Transition::Applied
    }

    /// Applies a failed completion for `ticket`.
    pub fn fail(&mut self, ticket: &RequestTicket, message: impl Into<String>) -> Transition {
        if let Err(reason) = self.accepts(ticket) {
            return Transition::Discarded(reason);
        }

        self.finish();
        self.status = SearchStatus::Error;
        self.error_message = Some(message.into());
        Transition::Applied
    }

    /// Returns the session to `Idle`, dropping query, result and in-flight request.
    ///
    /// Request ids keep increasing, so completions of requests issued before
    /// the reset can never match a later request.
    pub fn reset(&mut self) {
        let next_request_id = self.next_request_id;
        *self = Self {
            next_request_id,
            ..Self::default()
        };
    }

    fn accepts(&self, ticket: &RequestTicket) -> Result<(), DiscardReason> {
        let Some(in_flight) = &self.in_flight else {
            return Err(DiscardReason::NotLoading);
        };
        if in_flight.id != ticket.id || ticket.query != self.current_query {
            return Err(DiscardReason::Superseded);
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.in_flight = None;
        self.last_latency = self.started_at.take().map(|started| Utc::now() - started);
    }

    /// Query of the latest submission (empty while idle).
    #[must_use]
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// Result of the latest successful search.
    #[must_use]
    pub const fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Message of the latest failed search.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The request that may still complete.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&RequestTicket> {
        self.in_flight.as_ref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// Time between submission and completion of the latest finished search.
    #[must_use]
    pub const fn last_latency(&self) -> Option<chrono::Duration> {
        self.last_latency
    }
}
