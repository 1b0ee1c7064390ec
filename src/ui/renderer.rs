//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: `UIViewModel` → ANSI output on stdout
//!
//! # Example
//!
//! ```rust
//! use vibio::app::AppState;
//! use vibio::client::SearchClient;
//! use vibio::ui::{render, Theme};
//!
//! let state = AppState::new(SearchClient::default(), Theme::default());
//! render(&state, 24, 80);
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
