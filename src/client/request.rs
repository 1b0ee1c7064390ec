//! Search client: request construction and response interpretation.
//!
//! The plugin host performs the actual HTTP call. This client owns everything
//! around it:
//!
//! 1. validating the query ([`SearchClient::normalize_query`])
//! 2. building exactly one [`SearchRequest`] per search ([`SearchClient::prepare`])
//! 3. turning the host's response into a result or a cause ([`SearchClient::interpret`])
//!
//! Requests carry a [`RequestTicket`] in the host's correlation context so a
//! response can be matched back to the search that issued it.

use super::payload::decode_search_result;
use crate::domain::{ClientError, SearchMode, SearchResult};
use std::collections::BTreeMap;

/// Correlation context key holding the request id.
const CONTEXT_REQUEST_ID: &str = "request_id";

/// Correlation context key holding the query text.
const CONTEXT_QUERY: &str = "query";

/// Identity of one issued search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    /// Monotonic id assigned by the session state.
    pub id: u64,
    /// Trimmed query text the request was issued for.
    pub query: String,
}

impl RequestTicket {
    /// Encodes the ticket into a host correlation context.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID.to_string(), self.id.to_string());
        context.insert(CONTEXT_QUERY.to_string(), self.query.clone());
        context
    }

    /// Recovers a ticket from a host correlation context.
    ///
    /// Returns `None` when either key is missing or the id is not a number.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let id = context.get(CONTEXT_REQUEST_ID)?.parse().ok()?;
        let query = context.get(CONTEXT_QUERY)?.clone();
        Some(Self { id, query })
    }
}

/// A fully built outbound search request, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Absolute `.../search` URL.
    pub url: String,
    /// HTTP headers.
    pub headers: BTreeMap<String, String>,
    /// JSON body bytes.
    pub body: Vec<u8>,
    /// The search this request belongs to.
    pub ticket: RequestTicket,
}

/// Builds search requests and interprets responses for one backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchClient {
    /// Base URL without trailing slash; `None` when unconfigured.
    base_url: Option<String>,
    /// Body field carrying the search mode; the mode is not sent when `None`.
    mode_field: Option<String>,
}

impl SearchClient {
    /// Creates a client for `base_url`.
    ///
    /// Blank URLs count as unconfigured and a trailing `/` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use vibio::client::SearchClient;
    ///
    /// let client = SearchClient::new(Some("https://api.example.com/"), None);
    /// assert_eq!(client.base_url(), Some("https://api.example.com"));
    /// assert!(!SearchClient::new(Some("  "), None).is_configured());
    /// ```
    #[must_use]
    pub fn new(base_url: Option<&str>, mode_field: Option<String>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(String::from);
        let mode_field = mode_field.filter(|field| !field.trim().is_empty());

        Self { base_url, mode_field }
    }

    /// Configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Whether a backend address is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Trims the raw input and rejects empty queries.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyQuery`] for empty or whitespace-only input.
    pub fn normalize_query(raw: &str) -> Result<String, ClientError> {
        let query = raw.trim();
        if query.is_empty() {
            Err(ClientError::EmptyQuery)
        } else {
            Ok(query.to_string())
        }
    }

    /// Builds the single outbound request for `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when no base URL is configured;
    /// no request is built in that case.
    pub fn prepare(&self, ticket: RequestTicket, mode: SearchMode) -> Result<SearchRequest, ClientError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| ClientError::Configuration("api_url is not set".to_string()))?;

        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), ticket.query.clone().into());
        if let Some(field) = &self.mode_field {
            body.insert(field.clone(), mode.as_str().into());
        }
        let body = serde_json::to_vec(&body)
            .map_err(|e| ClientError::Transport(format!("failed to encode request: {e}")))?;

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(SearchRequest {
            url: format!("{base_url}/search"),
            headers,
            body,
            ticket,
        })
    }

    /// Interprets the host's response for `ticket`.
    ///
    /// Status `0` is how a transport failure without any HTTP status is
    /// reported; any other non-2xx status is a backend failure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`], [`ClientError::Status`] or
    /// [`ClientError::Decode`]; never a partial result.
    pub fn interpret(&self, ticket: &RequestTicket, status: u16, body: &[u8]) -> Result<SearchResult, ClientError> {
        if status == 0 {
            return Err(ClientError::Transport(String::from_utf8_lossy(body).into_owned()));
        }
        if !(200..300).contains(&status) {
            return Err(ClientError::Status { status });
        }

        decode_search_result(&ticket.query, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(query: &str) -> RequestTicket {
        RequestTicket { id: 7, query: query.to_string() }
    }

    #[test]
    fn empty_and_whitespace_queries_are_rejected() {
        assert_eq!(SearchClient::normalize_query(""), Err(ClientError::EmptyQuery));
        assert_eq!(SearchClient::normalize_query(" \t\n"), Err(ClientError::EmptyQuery));
        assert_eq!(SearchClient::normalize_query("  bars "), Ok("bars".to_string()));
    }

    #[test]
    fn prepare_posts_json_to_search_endpoint() {
        let client = SearchClient::new(Some("http://localhost:8000/"), None);
        let request = client.prepare(ticket("coffee shops"), SearchMode::Deep).unwrap();

        assert_eq!(request.url, "http://localhost:8000/search");
        assert_eq!(request.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, serde_json::json!({ "query": "coffee shops" }));
    }

    #[test]
    fn mode_is_sent_only_when_a_field_is_configured() {
        let client = SearchClient::new(Some("http://api"), Some("search_type".to_string()));
        let request = client.prepare(ticket("bars"), SearchMode::Deep).unwrap();
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["search_type"], "deep");
    }

    #[test]
    fn unconfigured_client_builds_no_request() {
        let err = SearchClient::new(None, None)
            .prepare(ticket("bars"), SearchMode::Quick)
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn non_success_statuses_fail() {
        let client = SearchClient::new(Some("http://api"), None);
        let err = client.interpret(&ticket("q"), 500, br#"{"detail":"boom"}"#).unwrap_err();
        assert_eq!(err, ClientError::Status { status: 500 });

        let err = client.interpret(&ticket("q"), 0, b"connection refused").unwrap_err();
        assert_eq!(err, ClientError::Transport("connection refused".to_string()));
    }

    #[test]
    fn ticket_round_trips_through_context() {
        let original = ticket("study spots");
        assert_eq!(RequestTicket::from_context(&original.to_context()), Some(original));
        assert_eq!(RequestTicket::from_context(&BTreeMap::new()), None);
    }
}
