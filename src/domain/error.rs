//! Error types for the Vibio plugin.
//!
//! This module defines the crate-wide error type [`VibioError`] with its
//! [`Result`] alias, plus the search-specific failure types produced at the
//! search client boundary:
//!
//! - [`ClientError`]: the exact cause of a failed search, kept for diagnostics
//! - [`SearchFailure`]: the user-facing condition stored in the session state
//!
//! All errors are implemented with `thiserror`.

use thiserror::Error;

/// Generic message shown for every failed search.
///
/// The precise cause is logged but never displayed, so backend internals do
/// not leak into the UI.
pub const GENERIC_SEARCH_FAILURE: &str = "Failed to search. Please try again.";

/// The main error type for Vibio plugin operations.
///
/// Covers failures of the plugin itself (configuration, theming, I/O). Search
/// failures never surface as `VibioError`; they are converted into the session's
/// `Error` state at the client boundary.
#[derive(Debug, Error)]
pub enum VibioError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Vibio operations.
pub type Result<T> = std::result::Result<T, VibioError>;

/// Exact cause of a search that did not produce a result.
///
/// The variants map onto the failure taxonomy of the search client:
/// `EmptyQuery` is a silent validation short-circuit, `Configuration` means the
/// backend address is unset, and the remaining variants are network failures
/// split by cause for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Query was empty after trimming; no request is issued.
    #[error("query is empty")]
    EmptyQuery,

    /// The backend base URL is not configured.
    #[error("search endpoint is not configured: {0}")]
    Configuration(String),

    /// The transport layer reported a failure before any HTTP status arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code.
    #[error("backend returned HTTP {status}")]
    Status {
        /// HTTP status code received.
        status: u16,
    },

    /// The response body could not be decoded as a search payload.
    #[error("malformed search payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// Short machine-readable label used as the `failure.kind` tracing field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::Configuration(_) => "configuration",
            Self::Transport(_) => "network",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }

    /// Whether this cause is a configuration problem rather than a network one.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// User-facing search failure.
///
/// Wraps the diagnostic [`ClientError`] while always displaying the generic
/// failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", GENERIC_SEARCH_FAILURE)]
pub struct SearchFailure {
    cause: ClientError,
}

impl SearchFailure {
    /// Returns the underlying cause (for logging only).
    #[must_use]
    pub const fn cause(&self) -> &ClientError {
        &self.cause
    }

    /// Returns the message shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        GENERIC_SEARCH_FAILURE
    }
}

impl From<ClientError> for SearchFailure {
    fn from(cause: ClientError) -> Self {
        Self { cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_displays_the_generic_message() {
        let causes = [
            ClientError::Configuration("api_url unset".into()),
            ClientError::Transport("connection refused".into()),
            ClientError::Status { status: 500 },
            ClientError::Decode("expected value".into()),
        ];

        for cause in causes {
            let failure = SearchFailure::from(cause);
            assert_eq!(failure.to_string(), GENERIC_SEARCH_FAILURE);
            assert_eq!(failure.user_message(), GENERIC_SEARCH_FAILURE);
        }
    }

    #[test]
    fn configuration_is_distinguished_from_network_causes() {
        assert!(ClientError::Configuration(String::new()).is_configuration());
        assert!(!ClientError::Status { status: 502 }.is_configuration());
        assert_eq!(ClientError::Transport(String::new()).kind(), "network");
        assert_eq!(ClientError::Configuration(String::new()).kind(), "configuration");
    }
}
