//! Search box and suggestion line renderers.

use crate::ui::helpers::{self, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, SuggestionItem};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 3;

/// Renders the 3-line search box at `row` and returns the next row.
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search: coffee shops_ [deep] │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// The border uses the accent color while the input has focus.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let edge = |at: usize, left: char, right: char| {
        position_cursor(at, 1);
        print!("{margin}{}{left}{}{right}{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());
    };

    let badge = format!(" [{}] ", search.mode);
    let cursor = if search.focused { "_" } else { "" };
    let text_width = inner_width.saturating_sub(badge.chars().count());
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), text_width);

    edge(row, '┌', '┐');

    position_cursor(row + 1, 1);
    print!(
        "{margin}{}│{}{search_text:<text_width$}{}{badge}{}│{}",
        Theme::fg(border),
        Theme::fg(&theme.colors.text_normal),
        Theme::fg(&theme.colors.accent_fg),
        Theme::fg(border),
        Theme::reset(),
    );

    edge(row + 2, '└', '┘');

    row + 3
}

/// Renders the suggestion line at `row` and returns the next row.
///
/// The suggestion `Tab` would apply is bold; matched characters are highlighted.
pub fn render_suggestions(row: usize, suggestions: &[SuggestionItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
    position_cursor(row, 1);

    if suggestions.is_empty() {
        return row + 1;
    }

    let label = "Try: ";
    let mut used = SEARCH_BOX_MARGIN + label.len();
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}{label}", Theme::fg(&theme.colors.text_dim));

    for (i, suggestion) in suggestions.iter().enumerate() {
        let separator = if i == 0 { "" } else { " · " };
        let width = separator.chars().count() + suggestion.text.chars().count();
        if used + width > cols {
            break;
        }
        used += width;

        print!("{}{separator}", Theme::fg(&theme.colors.text_dim));
        if suggestion.is_best {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(&theme.colors.text_normal));
        helpers::render_highlighted_text(&suggestion.text, &suggestion.highlight_ranges, theme, false);
        print!("{}", Theme::reset());
    }

    print!("{}", Theme::reset());
    row + 1
}
