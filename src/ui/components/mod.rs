//! Composable UI component renderers.
//!
//! # Components
//!
//! - `header`: title bar
//! - `search`: search box and suggestion line
//! - `status`: loading / count / error line
//! - `assistant`: revealed assistant text with typing cursor and caption
//! - `results`: revealed places
//! - `empty`: message shown when there is nothing to list
//! - `footer`: keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Box - 3 lines]
//! [Suggestions]
//! [Status]
//! [Assistant lines + caption]   (only with assistant text)
//! [Border]
//! [Places | Empty state]
//! [Border]
//! [Footer]
//! ```

mod assistant;
mod empty;
mod footer;
mod header;
mod results;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use assistant::render_assistant;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use results::render_results;
use search::{render_search_bar, render_suggestions};
use status::render_status;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_suggestions(current_row, &vm.suggestions, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    if let Some(panel) = &vm.assistant {
        current_row = render_assistant(current_row, panel, theme);
    }
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_results(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
