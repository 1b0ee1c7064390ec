//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the plugin runtime
//! feeds user input, search responses and reveal ticks into [`AppState`]. It
//! returns whether the UI needs a re-render and the [`Action`]s to execute.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`, `ApplySuggestion`, `ToggleMode`
//! - **Focus and navigation**: `FocusResults`, `FocusInput`, `KeyDown`, `KeyUp`
//! - **Lifecycle**: `CloseFocus` tears the surface down
//! - **Asynchronous completions**: `SearchResponse`, `RevealTick`
//!
//! # Example
//!
//! ```rust
//! use vibio::app::{handle_event, Action, AppState, Event};
//! use vibio::client::SearchClient;
//! use vibio::ui::Theme;
//!
//! let client = SearchClient::new(Some("http://localhost:8000"), None);
//! let mut state = AppState::new(client, Theme::default());
//! state.input = "bars".to_string();
//!
//! let (render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::SendSearch(_)]));
//! # Ok::<(), vibio::VibioError>(())
//! ```

use super::modes::InputMode;
use super::session::Transition;
use crate::app::{Action, AppState};
use crate::client::{RequestTicket, SearchClient};
use crate::domain::error::Result;
use crate::domain::{SearchFailure, SearchResult};
use crate::reveal::{RevealChannel, RevealToken, TickOutcome};
use std::collections::BTreeMap;

/// Events triggered by user input or by completions of earlier actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the input (editing mode only).
    Char(char),
    /// Removes the last character of the input (editing mode only).
    Backspace,
    /// Submits the input as a search.
    Submit,
    /// Replaces the input with the best suggestion and submits it.
    ApplySuggestion,
    /// Switches between quick and deep search.
    ToggleMode,
    /// Moves keyboard focus to the result list.
    FocusResults,
    /// Moves keyboard focus back to the input.
    FocusInput,
    /// Moves the selection down by one place (wraps to top).
    KeyDown,
    /// Moves the selection up by one place (wraps to bottom).
    KeyUp,
    /// Tears the session down and hides the plugin.
    CloseFocus,

    /// The host finished the web request issued by [`Action::SendSearch`].
    SearchResponse {
        /// HTTP status; `0` when the transport failed before any status.
        status: u16,
        /// Raw response body (or transport error text).
        body: Vec<u8>,
        /// Correlation context attached to the request.
        context: BTreeMap<String, String>,
    },

    /// A timer scheduled by [`Action::ScheduleTick`] fired.
    RevealTick {
        /// Reveal the tick belongs to.
        channel: RevealChannel,
        /// Token the tick was scheduled with.
        token: RevealToken,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the runtime.
///
/// # Errors
///
/// Reserved for failures of the plugin itself. Search failures never surface
/// here; they become the session's `Error` state.
///
/// # Tracing
///
/// Each call runs inside a debug-level `handle_event` span.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Char(c) => {
            if !state.input_mode.is_editing() {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, char = %c, "input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_editing() || state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::Submit => Ok(submit(state)),
        Event::ApplySuggestion => {
            let Some(suggestion) = state.best_suggestion() else {
                tracing::debug!(input = %state.input, "no suggestion matches input");
                return Ok((false, vec![]));
            };
            tracing::debug!(suggestion = %suggestion, "applying suggestion");
            state.input = suggestion;
            state.input_mode = InputMode::Editing;
            Ok(submit(state))
        }
        Event::ToggleMode => {
            state.search_mode = state.search_mode.toggled();
            tracing::debug!(mode = %state.search_mode, "search mode toggled");
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.input_mode == InputMode::Browsing {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::FocusInput => {
            if state.input_mode == InputMode::Editing {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Editing;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            tracing::debug!(
                status = ?state.session.status(),
                typing = state.is_typing(),
                streaming = state.is_streaming(),
                "tearing down search surface"
            );
            state.teardown();
            Ok((false, vec![Action::CloseFocus]))
        }
        Event::SearchResponse { status, body, context } => {
            Ok(handle_search_response(state, *status, body, context))
        }
        Event::RevealTick { channel, token } => {
            let outcome = match channel {
                RevealChannel::Text => state.assistant.tick(*token),
                RevealChannel::List => state.listing.tick(*token),
            };
            Ok(match outcome {
                TickOutcome::Stale => (false, vec![]),
                TickOutcome::Continue(next) => (true, vec![Action::ScheduleTick(next)]),
                TickOutcome::Finished => (true, vec![]),
            })
        }
    }
}

/// Starts a search for the current input.
///
/// Blank input is a silent no-op. An unconfigured client fails the session
/// immediately without emitting a request.
fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    let query = match SearchClient::normalize_query(&state.input) {
        Ok(query) => query,
        Err(cause) => {
            tracing::debug!(failure.kind = cause.kind(), "ignoring submission");
            return (false, vec![]);
        }
    };

    state.clear_reveals();
    let ticket = state.session.begin(query);

    match state.client.prepare(ticket.clone(), state.search_mode) {
        Ok(request) => {
            tracing::info!(
                request_id = ticket.id,
                query = %ticket.query,
                mode = %state.search_mode,
                url = %request.url,
                "search submitted"
            );
            (true, vec![Action::SendSearch(request)])
        }
        Err(cause) => {
            let failure = SearchFailure::from(cause);
            tracing::error!(
                request_id = ticket.id,
                failure.kind = failure.cause().kind(),
                error = %failure.cause(),
                "search not sent"
            );
            state.session.fail(&ticket, failure.user_message());
            (true, vec![])
        }
    }
}

fn handle_search_response(
    state: &mut AppState,
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> (bool, Vec<Action>) {
    let Some(ticket) = RequestTicket::from_context(context) else {
        tracing::warn!(status, "search response without request context");
        return (false, vec![]);
    };

    match state.client.interpret(&ticket, status, body) {
        Ok(result) => apply_result(state, &ticket, result),
        Err(cause) => {
            let failure = SearchFailure::from(cause);
            match state.session.fail(&ticket, failure.user_message()) {
                Transition::Applied => {
                    tracing::error!(
                        request_id = ticket.id,
                        query = %ticket.query,
                        status,
                        failure.kind = failure.cause().kind(),
                        error = %failure.cause(),
                        "search failed"
                    );
                    (true, vec![])
                }
                Transition::Discarded(reason) => {
                    tracing::debug!(request_id = ticket.id, ?reason, "discarding stale search failure");
                    (false, vec![])
                }
            }
        }
    }
}

fn apply_result(state: &mut AppState, ticket: &RequestTicket, result: SearchResult) -> (bool, Vec<Action>) {
    let places = result.places.clone();
    let text = result.assistant_text.clone().unwrap_or_default();

    if let Transition::Discarded(reason) = state.session.resolve(ticket, result) {
        tracing::debug!(request_id = ticket.id, ?reason, "discarding stale search result");
        return (false, vec![]);
    }

    tracing::info!(
        request_id = ticket.id,
        places = places.len(),
        has_assistant_text = !text.is_empty(),
        latency_ms = state.session.last_latency().map(|l| l.num_milliseconds()),
        "search succeeded"
    );

    let mut actions = vec![];
    state.selected_index = 0;

    if let Some(tick) = state.assistant.start(text) {
        actions.push(Action::ScheduleTick(tick));
    }

    if state.streaming {
        if let Some(tick) = state.listing.start(places) {
            actions.push(Action::ScheduleTick(tick));
        }
    } else {
        state.listing.show_all(places);
    }

    (true, actions)
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Submit => "Submit",
        Event::ApplySuggestion => "ApplySuggestion",
        Event::ToggleMode => "ToggleMode",
        Event::FocusResults => "FocusResults",
        Event::FocusInput => "FocusInput",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::CloseFocus => "CloseFocus",
        Event::SearchResponse { .. } => "SearchResponse",
        Event::RevealTick { .. } => "RevealTick",
    }
}
