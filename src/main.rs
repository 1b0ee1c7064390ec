//! Zellij plugin entry point.
//!
//! Thin shim between the host and the library: host events become
//! [`vibio::Event`]s, the resulting [`Action`]s become host calls.
//!
//! # Host Mapping
//!
//! - `Key` → input, focus and navigation events
//! - `WebRequestResult` → `Event::SearchResponse` (status, body, context)
//! - `Timer` → `Event::RevealTick`, routed through a [`TimerQueue`]
//! - `Action::SendSearch` → `web_request` (POST)
//! - `Action::ScheduleTick` → `set_timeout`
//! - `Action::CloseFocus` → `hide_self`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+t`: Toggle quick/deep mode
//! - `Ctrl+c`: Close the plugin
//! - `Down`/`Up`, `Ctrl+n`/`Ctrl+p`: Move the selection
//!
//! While editing:
//! - `Enter`: Search
//! - `Tab`: Complete the best suggestion and search
//! - `Esc`: Focus the results
//!
//! While browsing:
//! - `j`/`k`: Move the selection
//! - `/`, `i` or `Enter`: Back to the input
//! - `Esc` or `q`: Close the plugin

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use vibio::reveal::TimerQueue;
use vibio::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state: the library state plus host timer bookkeeping.
struct State {
    app: vibio::AppState,
    timers: TimerQueue,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: vibio::initialize(&Config::default()),
            timers: TimerQueue::new(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        vibio::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = vibio::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!(
            streaming = config.streaming,
            mode = %config.mode,
            "plugin load complete"
        );
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let span = tracing::debug_span!("plugin_update", event_type = %Self::event_name(&event));
        let _guard = span.entered();

        let ours = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Event::SearchResponse {
                    status,
                    body,
                    context,
                }
            }
            zellij_tile::prelude::Event::Timer(seconds) => match self.timers.fire(seconds) {
                Some((channel, token)) => Event::RevealTick { channel, token },
                None => {
                    tracing::debug!(seconds, "timer fired with nothing pending");
                    return false;
                }
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("web access denied - searches will fail");
                }
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &ours) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        vibio::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('t') => Some(Event::ToggleMode),
                BareKey::Char('c') => Some(Event::CloseFocus),
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            _ => {}
        }

        Some(match self.app.input_mode {
            InputMode::Editing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Tab => Event::ApplySuggestion,
                BareKey::Esc => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Char('j') => Event::KeyDown,
                BareKey::Char('k') => Event::KeyUp,
                BareKey::Char('/' | 'i') | BareKey::Enter => Event::FocusInput,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::SendSearch(request) => {
                tracing::debug!(request_id = request.ticket.id, "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Post,
                    request.headers.clone(),
                    request.body.clone(),
                    request.ticket.to_context(),
                );
            }
            Action::ScheduleTick(tick) => {
                set_timeout(self.timers.schedule(tick));
            }
            Action::CloseFocus => hide_self(),
        }
    }
}
