//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns [`Action`]s and the plugin
//! runtime executes them in order:
//!
//! - [`Action::SendSearch`] becomes one `web_request`
//! - [`Action::ScheduleTick`] becomes one `set_timeout`
//! - [`Action::CloseFocus`] hides the plugin pane
//!
//! # Example
//!
//! ```rust
//! use vibio::app::Action;
//!
//! let actions = vec![Action::CloseFocus];
//! assert!(matches!(actions[0], Action::CloseFocus));
//! ```

use crate::client::SearchRequest;
use crate::reveal::ScheduledTick;

/// Commands executed by the plugin runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends the search request to the backend.
    ///
    /// Emitted exactly once per accepted submission. The response comes back
    /// as [`Event::SearchResponse`](crate::app::Event::SearchResponse).
    SendSearch(SearchRequest),

    /// Delivers a reveal tick after the tick's delay.
    ///
    /// The tick comes back as [`Event::RevealTick`](crate::app::Event::RevealTick).
    ScheduleTick(ScheduledTick),

    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,
}
