//! Application state and view model computation.
//!
//! [`AppState`] owns everything one plugin instance knows: the query session,
//! both reveal schedulers, the search client, the input line and the
//! presentation settings. The event handler mutates it; the renderer reads it
//! through [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Session**: query lifecycle (`Idle`/`Loading`/`Success`/`Error`)
//! - **Reveals**: text (assistant) and list (places) progressive disclosure
//! - **Input**: the line being edited, focus mode and search mode
//! - **Selection**: cursor within the revealed places
//! - **Suggestions**: canned queries, fuzzy-matched against the input
//!
//! # Example
//!
//! ```rust
//! use vibio::app::AppState;
//! use vibio::client::SearchClient;
//! use vibio::ui::Theme;
//!
//! let mut state = AppState::new(SearchClient::default(), Theme::default());
//! state.input = "coff".to_string();
//! assert_eq!(state.best_suggestion().as_deref(), Some("coffee shops"));
//! ```

use super::modes::InputMode;
use super::session::{SearchStatus, SessionState};
use crate::client::SearchClient;
use crate::domain::{Place, SearchMode};
use crate::reveal::{
    ListReveal, RevealChannel, TextReveal, DEFAULT_LIST_INTERVAL, DEFAULT_TEXT_INTERVAL,
};
use crate::ui::helpers::{coalesce_ranges, truncate, wrap_text};
use crate::ui::icons;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AssistantPanel, EmptyState, FooterInfo, HeaderInfo, PlaceItem, SearchBarInfo, StatusKind,
    StatusLine, SuggestionItem, UIViewModel, ASSISTANT_MAX_LINES, PLACE_ITEM_HEIGHT,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Canned queries offered under the search input.
pub const DEFAULT_SUGGESTIONS: [&str; 5] = [
    "coffee shops",
    "study spots",
    "restaurants",
    "bars",
    "libraries",
];

/// Rows used by everything except the assistant panel and the result list.
const CHROME_ROWS: usize = 12;

/// Horizontal inset of the assistant panel and list items.
const CONTENT_MARGIN: usize = 3;

/// Query terms shorter than this are not highlighted in place names.
const MIN_HIGHLIGHT_TERM: usize = 3;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Query lifecycle state.
    pub session: SessionState,

    /// Character reveal of the assistant text.
    pub assistant: TextReveal,

    /// Item reveal of the place list.
    pub listing: ListReveal,

    /// Request builder for the configured backend.
    pub client: SearchClient,

    /// Text in the search input.
    pub input: String,

    /// Whether keys go to the input or the result list.
    pub input_mode: InputMode,

    /// Mode sent with the next search.
    pub search_mode: SearchMode,

    /// Stagger the list reveal; when off, places appear all at once.
    pub streaming: bool,

    /// Zero-based index of the selected place among the visible ones.
    pub selected_index: usize,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Suggested queries.
    pub suggestions: Vec<String>,
}

impl AppState {
    /// Creates an idle state with default reveal pacing and suggestions.
    #[must_use]
    pub fn new(client: SearchClient, theme: Theme) -> Self {
        Self {
            session: SessionState::new(),
            assistant: TextReveal::new(RevealChannel::Text, DEFAULT_TEXT_INTERVAL),
            listing: ListReveal::new(RevealChannel::List, DEFAULT_LIST_INTERVAL),
            client,
            input: String::new(),
            input_mode: InputMode::Editing,
            search_mode: SearchMode::default(),
            streaming: true,
            selected_index: 0,
            theme,
            suggestions: DEFAULT_SUGGESTIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Whether the assistant text is still being revealed.
    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.assistant.is_running()
    }

    /// Whether places are still being revealed.
    #[must_use]
    pub const fn is_streaming(&self) -> bool {
        self.listing.is_running()
    }

    /// Places visible so far, in backend order.
    #[must_use]
    pub fn visible_places(&self) -> &[Place] {
        self.listing.visible()
    }

    /// The selected place, if any is visible.
    #[must_use]
    pub fn selected_place(&self) -> Option<&Place> {
        self.visible_places().get(self.selected_index)
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_places().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_places().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            (self.selected_index - 1).min(len - 1)
        };
    }

    /// Cancels both reveals and drops their content.
    pub fn clear_reveals(&mut self) {
        self.assistant.clear();
        self.listing.clear();
        self.selected_index = 0;
    }

    /// Returns the surface to a fresh idle state.
    ///
    /// Both reveals are cancelled, so any tick still in flight is stale.
    pub fn teardown(&mut self) {
        self.clear_reveals();
        self.session.reset();
        self.input.clear();
        self.input_mode = InputMode::Editing;
    }

    /// Suggestions matching the input, best first, with matched character indices.
    ///
    /// Blank input matches every suggestion in its listed order.
    #[must_use]
    pub fn matching_suggestions(&self) -> Vec<(&str, Vec<usize>)> {
        let pattern = self.input.trim();
        if pattern.is_empty() {
            return self.suggestions.iter().map(|s| (s.as_str(), Vec::new())).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize, &str, Vec<usize>)> = self
            .suggestions
            .iter()
            .enumerate()
            .filter_map(|(order, suggestion)| {
                matcher
                    .fuzzy_indices(suggestion, pattern)
                    .map(|(score, indices)| (score, order, suggestion.as_str(), indices))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .map(|(_, _, suggestion, indices)| (suggestion, indices))
            .collect()
    }

    /// The suggestion `Tab` applies for the current input.
    #[must_use]
    pub fn best_suggestion(&self) -> Option<String> {
        self.matching_suggestions()
            .first()
            .map(|(suggestion, _)| (*suggestion).to_string())
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!(
            "compute_viewmodel",
            rows,
            cols,
            status = ?self.session.status(),
            visible = self.visible_places().len()
        )
        .entered();

        let assistant = self.compute_assistant(cols);
        let assistant_rows = assistant.as_ref().map_or(0, |panel| panel.lines.len() + 1);
        let list_rows = rows.saturating_sub(CHROME_ROWS + assistant_rows);
        let (display_items, selected_index) = self.compute_display_items(list_rows, cols);

        UIViewModel {
            header: HeaderInfo {
                title: " Vibio · find places that match your vibe ".to_string(),
            },
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                mode: self.search_mode,
                focused: self.input_mode.is_editing(),
            },
            suggestions: self.compute_suggestions(),
            status: self.compute_status(),
            assistant,
            display_items,
            selected_index,
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    fn compute_suggestions(&self) -> Vec<SuggestionItem> {
        if !self.input_mode.is_editing() {
            return vec![];
        }
        self.matching_suggestions()
            .into_iter()
            .enumerate()
            .map(|(position, (text, indices))| SuggestionItem {
                text: text.to_string(),
                highlight_ranges: coalesce_ranges(&indices),
                is_best: position == 0,
            })
            .collect()
    }

    fn compute_status(&self) -> Option<StatusLine> {
        match self.session.status() {
            SearchStatus::Idle => None,
            SearchStatus::Loading => Some(StatusLine {
                message: "Searching for the perfect spots...".to_string(),
                kind: StatusKind::Loading,
            }),
            SearchStatus::Error => Some(StatusLine {
                message: self
                    .session
                    .error_message()
                    .unwrap_or(crate::domain::GENERIC_SEARCH_FAILURE)
                    .to_string(),
                kind: StatusKind::Error,
            }),
            SearchStatus::Success if self.is_streaming() => Some(StatusLine {
                message: "Loading more results...".to_string(),
                kind: StatusKind::Loading,
            }),
            SearchStatus::Success => {
                let result = self.session.result()?;
                if result.places.is_empty() {
                    return None;
                }
                let count = result.places.len();
                let noun = if count == 1 { "place" } else { "places" };
                let message = self.session.last_latency().map_or_else(
                    || format!("{count} {noun} found"),
                    |latency| {
                        #[allow(clippy::cast_precision_loss)]
                        let secs = latency.num_milliseconds() as f64 / 1000.0;
                        format!("{count} {noun} found in {secs:.1}s")
                    },
                );
                Some(StatusLine { message, kind: StatusKind::Info })
            }
        }
    }

    fn compute_assistant(&self, cols: usize) -> Option<AssistantPanel> {
        if self.session.status() != SearchStatus::Success || self.assistant.total() == 0 {
            return None;
        }

        let width = cols.saturating_sub(CONTENT_MARGIN * 2).max(10);
        let mut lines = wrap_text(self.assistant.visible(), width);
        if lines.len() > ASSISTANT_MAX_LINES {
            lines.truncate(ASSISTANT_MAX_LINES);
            if let Some(last) = lines.last_mut() {
                *last = truncate(&format!("{last} ..."), width);
            }
        }
        if lines.is_empty() {
            lines.push(String::new());
        }

        Some(AssistantPanel {
            lines,
            typing: self.is_typing(),
            caption: format!(
                "Here's what matches your vibe for \"{}\"",
                self.session.current_query()
            ),
        })
    }

    fn compute_display_items(&self, list_rows: usize, cols: usize) -> (Vec<PlaceItem>, usize) {
        let places = self.visible_places();
        let capacity = (list_rows / PLACE_ITEM_HEIGHT).max(1);
        if places.is_empty() {
            return (vec![], 0);
        }

        let selected = self.selected_index.min(places.len() - 1);
        let mut visible_start = selected.saturating_sub(capacity / 2);
        let visible_end = (visible_start + capacity).min(places.len());
        if visible_end - visible_start < capacity && places.len() >= capacity {
            visible_start = visible_end.saturating_sub(capacity);
        }

        let matcher = SkimMatcherV2::default();
        let terms: Vec<String> = self
            .session
            .current_query()
            .split_whitespace()
            .filter(|term| term.chars().count() >= MIN_HIGHLIGHT_TERM)
            .map(str::to_lowercase)
            .collect();
        let width = cols.saturating_sub(CONTENT_MARGIN * 2).max(10);

        let items = places[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, place)| {
                let absolute = visible_start + offset;
                Self::compute_place_item(place, absolute, absolute == selected, &terms, &matcher, width)
            })
            .collect();

        (items, selected - visible_start)
    }

    fn compute_place_item(
        place: &Place,
        index: usize,
        is_selected: bool,
        terms: &[String],
        matcher: &SkimMatcherV2,
        width: usize,
    ) -> PlaceItem {
        let indices: Vec<usize> = terms
            .iter()
            .filter_map(|term| matcher.fuzzy_indices(&place.name, term))
            .flat_map(|(_, indices)| indices)
            .collect();

        let coordinates = place
            .coordinates
            .map(|c| format!("{:.4}, {:.4}", c.latitude, c.longitude));
        let location = match (place.neighborhood.as_deref(), coordinates) {
            (Some(hood), Some(coords)) => Some(format!("{hood} · {coords}")),
            (Some(hood), None) => Some(hood.to_string()),
            (None, coords) => coords,
        };

        PlaceItem {
            rank: index + 1,
            emoji: icons::place_emoji(place).to_string(),
            name: place.name.clone(),
            match_label: format!("{}% match", place.match_percent()),
            location,
            description: place.description.as_deref().map(|d| truncate(d, width)),
            tags: place.tags.iter().map(|tag| icons::format_tag(tag)).collect(),
            is_selected,
            highlight_ranges: coalesce_ranges(&indices),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.session.status() {
            SearchStatus::Idle => Some(EmptyState {
                message: "Find places that match your vibe".to_string(),
                subtitle: "Type a search and press Enter, or Tab for a suggestion".to_string(),
            }),
            SearchStatus::Success
                if self.session.result().is_some_and(|r| r.places.is_empty()) =>
            {
                Some(EmptyState {
                    message: format!("No places found for \"{}\".", self.session.current_query()),
                    subtitle: "Try a different search term!".to_string(),
                })
            }
            _ => None,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing => {
                "Enter: search  Tab: suggestion  Ctrl+t: quick/deep  Esc: results  Ctrl+c: quit"
            }
            InputMode::Browsing => "j/k: navigate  /: edit query  Ctrl+t: quick/deep  q: quit",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
