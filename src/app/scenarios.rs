//! End-to-end flows through `handle_event`, with a fake runtime that delivers
//! scheduled ticks in order.

use crate::app::{handle_event, Action, AppState, Event, InputMode, SearchStatus};
use crate::client::{RequestTicket, SearchClient};
use crate::domain::GENERIC_SEARCH_FAILURE;
use crate::reveal::TimerQueue;
use crate::ui::Theme;
use std::collections::VecDeque;

const BLUE_BOTTLE: &[u8] = br#"{"places":[{"place_id":"p1","name":"Blue Bottle","score":0.92}],"llm_response":"Based on your vibe..."}"#;

/// Stand-in for the host: keeps the request outbox and pending timers.
struct Runtime {
    state: AppState,
    timers: TimerQueue,
    pending: VecDeque<f64>,
    sent: Vec<RequestTicket>,
    closed: bool,
}

impl Runtime {
    fn new(base_url: Option<&str>) -> Self {
        Self {
            state: AppState::new(SearchClient::new(base_url, None), Theme::default()),
            timers: TimerQueue::new(),
            pending: VecDeque::new(),
            sent: Vec::new(),
            closed: false,
        }
    }

    fn send(&mut self, event: &Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, event).unwrap();
        for action in actions {
            match action {
                Action::SendSearch(request) => self.sent.push(request.ticket),
                Action::ScheduleTick(tick) => self.pending.push_back(self.timers.schedule(&tick)),
                Action::CloseFocus => self.closed = true,
            }
        }
        render
    }

    fn search(&mut self, query: &str) -> RequestTicket {
        self.state.input = query.to_string();
        let before = self.sent.len();
        self.send(&Event::Submit);
        assert_eq!(self.sent.len(), before + 1, "submission should send one request");
        self.sent[before].clone()
    }

    fn respond(&mut self, ticket: &RequestTicket, status: u16, body: &[u8]) -> bool {
        self.send(&Event::SearchResponse {
            status,
            body: body.to_vec(),
            context: ticket.to_context(),
        })
    }

    /// Fires timers until none are pending; returns how many fired.
    fn drain_timers(&mut self) -> usize {
        let mut fired = 0;
        while let Some(seconds) = self.pending.pop_front() {
            if let Some((channel, token)) = self.timers.fire(seconds) {
                self.send(&Event::RevealTick { channel, token });
            }
            fired += 1;
            assert!(fired < 10_000, "reveal never finished");
        }
        fired
    }
}

#[test]
fn successful_search_reveals_text_and_places() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let ticket = rt.search("coffee shops");
    assert_eq!(rt.state.session.status(), SearchStatus::Loading);

    assert!(rt.respond(&ticket, 200, BLUE_BOTTLE));
    assert_eq!(rt.state.session.status(), SearchStatus::Success);
    assert!(rt.state.is_typing());
    assert!(rt.state.visible_places().is_empty());

    let fired = rt.drain_timers();

    assert_eq!(fired, "Based on your vibe...".chars().count() + 1);
    assert!(!rt.state.is_typing());
    assert!(!rt.state.is_streaming());
    assert_eq!(rt.state.assistant.visible(), "Based on your vibe...");
    assert_eq!(rt.state.visible_places().len(), 1);
    assert_eq!(rt.state.visible_places()[0].name, "Blue Bottle");
}

#[test]
fn backend_error_shows_generic_message() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let ticket = rt.search("coffee shops");

    rt.respond(&ticket, 500, b"Internal Server Error");

    assert_eq!(rt.state.session.status(), SearchStatus::Error);
    assert_eq!(rt.state.session.error_message(), Some(GENERIC_SEARCH_FAILURE));
    assert!(rt.state.session.result().is_none());
    assert!(rt.pending.is_empty());
}

#[test]
fn transport_failure_shows_generic_message() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let ticket = rt.search("bars");

    rt.respond(&ticket, 0, b"connection refused");

    assert_eq!(rt.state.session.status(), SearchStatus::Error);
    assert_eq!(rt.state.session.error_message(), Some(GENERIC_SEARCH_FAILURE));
}

#[test]
fn missing_base_url_fails_without_request() {
    let mut rt = Runtime::new(None);
    rt.state.input = "coffee shops".to_string();

    assert!(rt.send(&Event::Submit));

    assert!(rt.sent.is_empty());
    assert_eq!(rt.state.session.status(), SearchStatus::Error);
    assert_eq!(rt.state.session.error_message(), Some(GENERIC_SEARCH_FAILURE));
}

#[test]
fn late_response_for_superseded_query_is_ignored() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let first = rt.search("bars");
    let second = rt.search("cafes");

    rt.respond(&second, 200, br#"{"places":[{"place_id":"c","name":"Cafe C"}]}"#);
    rt.drain_timers();
    assert!(!rt.respond(&first, 200, br#"{"places":[{"place_id":"b","name":"Bar B"}]}"#));

    assert_eq!(rt.state.session.current_query(), "cafes");
    let names: Vec<&str> = rt.state.visible_places().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Cafe C"]);
}

#[test]
fn older_response_arriving_first_does_not_end_loading() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let first = rt.search("bars");
    let second = rt.search("cafes");

    assert!(!rt.respond(&first, 200, BLUE_BOTTLE));
    assert_eq!(rt.state.session.status(), SearchStatus::Loading);
    assert!(rt.pending.is_empty());

    rt.respond(&second, 200, br#"{"places":[]}"#);
    assert_eq!(rt.state.session.status(), SearchStatus::Success);
}

#[test]
fn resubmitting_mid_reveal_restarts_from_nothing() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.streaming = false;
    let first = rt.search("coffee shops");
    rt.respond(&first, 200, BLUE_BOTTLE);

    // Only text ticks are pending; deliver three characters, then resubmit.
    for _ in 0..3 {
        let seconds = rt.pending.pop_front().unwrap();
        let (channel, token) = rt.timers.fire(seconds).unwrap();
        rt.send(&Event::RevealTick { channel, token });
    }
    assert_eq!(rt.state.assistant.visible(), "Bas");

    let second = rt.search("study spots");
    assert_eq!(rt.state.assistant.visible(), "");

    rt.drain_timers();
    assert_eq!(rt.state.assistant.visible(), "");
    assert_eq!(rt.state.session.status(), SearchStatus::Loading);

    rt.respond(&second, 200, br#"{"places":[],"llm_response":"Quiet corners."}"#);
    rt.drain_timers();
    assert_eq!(rt.state.assistant.visible(), "Quiet corners.");
}

#[test]
fn empty_input_is_a_silent_no_op() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.input = "  ".to_string();

    assert!(!rt.send(&Event::Submit));
    assert!(rt.sent.is_empty());
    assert_eq!(rt.state.session.status(), SearchStatus::Idle);
}

#[test]
fn closing_tears_down_and_discards_late_results() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    let ticket = rt.search("coffee shops");
    rt.state.input_mode = InputMode::Browsing;

    rt.send(&Event::CloseFocus);
    assert!(rt.closed);

    rt.respond(&ticket, 200, BLUE_BOTTLE);
    assert_eq!(rt.state.session.status(), SearchStatus::Idle);
    assert!(rt.state.visible_places().is_empty());
    assert!(rt.pending.is_empty());
}

#[test]
fn timers_left_over_from_a_closed_search_do_not_drive_the_next_one() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.streaming = false;
    let first = rt.search("coffee shops");
    rt.respond(&first, 200, BLUE_BOTTLE);
    let leftover = rt.pending.len();
    assert!(leftover > 0);

    rt.state.input_mode = InputMode::Browsing;
    rt.send(&Event::CloseFocus);
    assert!(rt.closed);

    let second = rt.search("study spots");
    rt.respond(&second, 200, br#"{"places":[],"llm_response":"Quiet corners."}"#);
    assert!(rt.pending.len() > leftover);

    // The host still delivers every timer set before the close.
    for _ in 0..leftover {
        let seconds = rt.pending.pop_front().unwrap();
        let (channel, token) = rt.timers.fire(seconds).unwrap();
        rt.send(&Event::RevealTick { channel, token });
    }
    assert_eq!(rt.state.assistant.visible(), "");

    rt.drain_timers();
    assert_eq!(rt.state.assistant.visible(), "Quiet corners.");
    assert!(rt.timers.is_empty());
}

#[test]
fn status_counts_places_that_survive_normalization() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.streaming = false;
    let ticket = rt.search("coffee shops");
    rt.respond(
        &ticket,
        200,
        br#"{"places":[{"id":"a","name":"A"},{"id":"a","name":"Dup"},{"id":"b"}],"total_results":3}"#,
    );

    assert_eq!(rt.state.visible_places().len(), 1);
    let status = rt.state.compute_viewmodel(30, 80).status.unwrap();
    assert!(
        status.message.starts_with("1 place found"),
        "unexpected status: {}",
        status.message
    );
}

#[test]
fn selection_moves_without_leaving_the_input() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.streaming = false;
    let ticket = rt.search("coffee shops");
    rt.respond(
        &ticket,
        200,
        br#"{"places":[{"id":"a","name":"A"},{"id":"b","name":"B"}]}"#,
    );
    assert_eq!(rt.state.input_mode, InputMode::Editing);

    assert!(rt.send(&Event::KeyDown));
    assert_eq!(rt.state.selected_place().map(|p| p.name.as_str()), Some("B"));
    assert!(rt.send(&Event::KeyUp));
    assert_eq!(rt.state.selected_place().map(|p| p.name.as_str()), Some("A"));
    assert_eq!(rt.state.input_mode, InputMode::Editing);
    assert_eq!(rt.state.input, "coffee shops");
}

#[test]
fn tab_completes_suggestion_and_searches() {
    let mut rt = Runtime::new(Some("http://localhost:8000"));
    rt.state.input = "libr".to_string();

    rt.send(&Event::ApplySuggestion);

    assert_eq!(rt.sent.len(), 1);
    assert_eq!(rt.sent[0].query, "libraries");
    assert_eq!(rt.state.input, "libraries");
}
