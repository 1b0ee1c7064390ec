//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! data only: formatted labels, wrapped lines, highlight ranges and the
//! windowed slice of the result list.
//!
//! # Example
//!
//! ```rust
//! use vibio::app::AppState;
//! use vibio::client::SearchClient;
//! use vibio::ui::Theme;
//!
//! let state = AppState::new(SearchClient::default(), Theme::default());
//! let vm = state.compute_viewmodel(24, 80);
//! assert!(vm.display_items.is_empty());
//! assert!(vm.empty_state.is_some());
//! ```

use crate::domain::SearchMode;

/// Rows taken by one place in the result list (three content lines and a spacer).
pub const PLACE_ITEM_HEIGHT: usize = 4;

/// Most assistant lines shown before the text is cut.
pub const ASSISTANT_MAX_LINES: usize = 6;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Suggested queries shown under the input.
    pub suggestions: Vec<SuggestionItem>,

    /// One-line status (loading, count, error).
    pub status: Option<StatusLine>,

    /// Assistant commentary, present once a result carries text.
    pub assistant: Option<AssistantPanel>,

    /// Windowed slice of the revealed places.
    pub display_items: Vec<PlaceItem>,

    /// Index of the selected item within `display_items`.
    pub selected_index: usize,

    /// Message shown instead of the list when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Search box contents.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current input text.
    pub query: String,
    /// Mode sent with the next search.
    pub mode: SearchMode,
    /// Whether keystrokes go to the input.
    pub focused: bool,
}

/// One suggested query.
#[derive(Debug, Clone)]
pub struct SuggestionItem {
    /// Suggestion text.
    pub text: String,
    /// Character ranges matching the current input.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Whether `Tab` would apply this suggestion.
    pub is_best: bool,
}

/// Styling class of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Neutral information (result count).
    Info,
    /// Work in progress (request in flight, list still revealing).
    Loading,
    /// The last search failed.
    Error,
}

/// Single status line under the search box.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

/// Assistant text panel.
#[derive(Debug, Clone)]
pub struct AssistantPanel {
    /// Revealed text wrapped to the panel width.
    pub lines: Vec<String>,
    /// Whether the reveal is still running (draws the typing cursor).
    pub typing: bool,
    /// Caption naming the query the text belongs to.
    pub caption: String,
}

/// Display information for one revealed place.
#[derive(Debug, Clone)]
pub struct PlaceItem {
    /// One-based position in the result list.
    pub rank: usize,
    pub emoji: String,
    pub name: String,
    /// `NN% match` label.
    pub match_label: String,
    /// Neighborhood and coordinates, joined.
    pub location: Option<String>,
    pub description: Option<String>,
    /// Rendered tags (`emoji Label`).
    pub tags: Vec<String>,
    pub is_selected: bool,
    /// Character ranges of `name` matching query terms.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Message shown when there is nothing to list.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
