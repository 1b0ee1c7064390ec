//! Empty state component renderer.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state below a blank line and returns the next row.
///
/// ```text
///
///            Find places that match your vibe
///  Type a search and press Enter, or Tab for a suggestion
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    print_centered(row + 1, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 2, &empty.subtitle, &subtitle_style, cols);

    row + 3
}
