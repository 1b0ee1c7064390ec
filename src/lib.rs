//! Vibio: a Zellij plugin for vibe-based place search.
//!
//! Vibio sends a free-text phrase ("cozy coffee shops with good light") to a
//! remote place search service and discloses the answer progressively. Places
//! appear one at a time, the assistant commentary is typed out character by
//! character, and an answer to an older question never replaces a newer one.
//!
//! # Architecture
//!
//! ```text
//!  host events                                   host calls
//!  Key / WebRequestResult / Timer                web_request / set_timeout / hide_self
//!        │                                             ▲
//!        ▼                                             │
//!  main.rs ── Event ──▶ app::handle_event ── Action ───┘
//!                          │
//!                          ├── app::SessionState   Idle → Loading → Success | Error
//!                          ├── client              request body, response decoding
//!                          ├── reveal              TextReveal, ListReveal, TimerQueue
//!                          └── AppState::compute_viewmodel ──▶ ui::render
//! ```
//!
//! # Modules
//!
//! - [`app`]: Events, actions, the query session and the view model
//! - [`client`]: Search request construction and response normalization
//! - [`domain`]: Places, results and the error taxonomy
//! - [`reveal`]: Cancellable timer-paced reveal schedulers
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering, themes and icons
//! - [`observability`]: Tracing with file-based OTLP export
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/vibio.wasm" {
//!         api_url "http://localhost:8000"
//!         mode "quick"
//!         mode_field "search_type"
//!         streaming "true"
//!         text_interval_ms "20"
//!         list_interval_ms "300"
//!         theme "vibio-dark"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use vibio::{handle_event, initialize, Action, Config, Event};
//!
//! let mut map = BTreeMap::new();
//! map.insert("api_url".to_string(), "http://localhost:8000".to_string());
//! let mut state = initialize(&Config::from_zellij(&map));
//!
//! state.input = "coffee shops".to_string();
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::SendSearch(_)]));
//! # Ok::<(), vibio::VibioError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod reveal;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchStatus};
pub use domain::{ClientError, Place, Result, SearchFailure, SearchMode, SearchResult, VibioError};
pub use ui::Theme;

use client::SearchClient;
use reveal::{
    ListReveal, RevealChannel, TextReveal, DEFAULT_LIST_INTERVAL, DEFAULT_TEXT_INTERVAL,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Built-in theme used when none is configured.
pub const DEFAULT_THEME: &str = "vibio-dark";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the search service; searches fail without it.
    pub api_url: Option<String>,

    /// Initial search mode. Default: quick.
    pub mode: SearchMode,

    /// Request body field carrying the mode; the mode is not sent when unset.
    pub mode_field: Option<String>,

    /// Stagger the list reveal. Default: `true`.
    pub streaming: bool,

    /// Tick period of the assistant text reveal. Default: 20 ms.
    pub text_interval: Duration,

    /// Tick period of the place list reveal. Default: 300 ms.
    pub list_interval: Duration,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file (`~` expands into the host sandbox).
    pub theme_file: Option<String>,

    /// Tracing filter. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Values that were present but invalid and replaced by defaults.
    ///
    /// Parsing happens before tracing is up, so these are logged by
    /// [`initialize`].
    pub issues: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            mode: SearchMode::default(),
            mode_field: None,
            streaming: true,
            text_interval: DEFAULT_TEXT_INTERVAL,
            list_interval: DEFAULT_LIST_INTERVAL,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            issues: Vec::new(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. Invalid values fall back to their default
    /// and are recorded in [`Config::issues`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use vibio::{Config, SearchMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://localhost:8000".to_string());
    /// map.insert("mode".to_string(), "deep".to_string());
    /// map.insert("list_interval_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.mode, SearchMode::Deep);
    /// assert_eq!(config.list_interval, Duration::from_millis(300));
    /// assert_eq!(config.issues.len(), 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let mut issues = Vec::new();

        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let mode = value("mode").map_or(defaults.mode, |raw| {
            raw.parse::<SearchMode>().unwrap_or_else(|e| {
                issues.push(VibioError::Config(format!("mode: {e}")).to_string());
                defaults.mode
            })
        });

        let streaming = value("streaming").map_or(defaults.streaming, |raw| {
            parse_flag(&raw).unwrap_or_else(|e| {
                issues.push(e.to_string());
                defaults.streaming
            })
        });

        let mut interval = |key: &str, default: Duration| {
            value(key).map_or(default, |raw| {
                parse_millis(key, &raw).unwrap_or_else(|e| {
                    issues.push(e.to_string());
                    default
                })
            })
        };
        let text_interval = interval("text_interval_ms", defaults.text_interval);
        let list_interval = interval("list_interval_ms", defaults.list_interval);

        Self {
            api_url: value("api_url"),
            mode,
            mode_field: value("mode_field"),
            streaming,
            text_interval,
            list_interval,
            theme_name: value("theme"),
            theme_file: value("theme_file"),
            trace_level: value("trace_level"),
            issues,
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(VibioError::Config(format!("streaming: expected a boolean, got '{other}'"))),
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration> {
    match raw.parse::<u64>() {
        Ok(0) => Err(VibioError::Config(format!("{key}: must be at least 1"))),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(VibioError::Config(format!("{key}: {e}"))),
    }
}

/// Loads the configured theme, falling back to the default one.
fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Initializes the plugin state from configuration.
///
/// A missing `api_url` is not fatal: it is logged as a configuration failure
/// and every search attempt then ends in the `Error` state without a request.
///
/// # Example
///
/// ```rust
/// use vibio::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(!state.client.is_configured());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing vibio plugin");

    for issue in &config.issues {
        tracing::warn!(issue = %issue, "ignoring invalid configuration value");
    }

    let client = SearchClient::new(config.api_url.as_deref(), config.mode_field.clone());
    if !client.is_configured() {
        let cause = ClientError::Configuration("api_url is not set".to_string());
        tracing::error!(failure.kind = cause.kind(), error = %cause, "search endpoint missing");
    }

    let mut state = AppState::new(client, load_theme(config));
    state.search_mode = config.mode;
    state.streaming = config.streaming;
    state.assistant = TextReveal::new(RevealChannel::Text, config.text_interval);
    state.listing = ListReveal::new(RevealChannel::List, config.list_interval);

    tracing::debug!(
        api_url = ?config.api_url,
        mode = %config.mode,
        streaming = config.streaming,
        theme = %state.theme.name,
        "plugin state initialized"
    );

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_apply_to_an_empty_map() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert!(config.api_url.is_none());
        assert!(config.streaming);
        assert_eq!(config.text_interval, Duration::from_millis(20));
        assert!(config.issues.is_empty());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_zellij(&map(&[("api_url", "  "), ("mode_field", "")]));
        assert!(config.api_url.is_none());
        assert!(config.mode_field.is_none());
    }

    #[test]
    fn invalid_values_fall_back_and_are_reported() {
        let config = Config::from_zellij(&map(&[
            ("streaming", "sometimes"),
            ("text_interval_ms", "0"),
            ("mode", "turbo"),
        ]));
        assert!(config.streaming);
        assert_eq!(config.text_interval, DEFAULT_TEXT_INTERVAL);
        assert_eq!(config.mode, SearchMode::Quick);
        assert_eq!(config.issues.len(), 3);
    }

    #[test]
    fn initialize_applies_reveal_settings() {
        let config = Config::from_zellij(&map(&[
            ("api_url", "http://localhost:8000/"),
            ("streaming", "off"),
            ("list_interval_ms", "50"),
            ("theme", "vibio-light"),
        ]));
        let state = initialize(&config);

        assert_eq!(state.client.base_url(), Some("http://localhost:8000"));
        assert!(!state.streaming);
        assert_eq!(state.listing.interval(), Duration::from_millis(50));
        assert_eq!(state.theme.name, "vibio-light");
    }
}
