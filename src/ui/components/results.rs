//! Result list renderer.
//!
//! Each place takes [`PLACE_ITEM_HEIGHT`] rows:
//!
//! ```text
//! #1  ☕ Blue Bottle                                   92% match
//!     📍 Hayes Valley · 37.7763, -122.4232  Third-wave pour-overs
//!     ☕️ Cafe  🏷️ Wifi
//! ```

use crate::ui::helpers::{self, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PlaceItem, PLACE_ITEM_HEIGHT};

/// Left margin of the list.
const LIST_MARGIN: usize = 1;

/// Width of the `#NN ` rank column.
const RANK_WIDTH: usize = 5;

/// Renders the items starting at `row` and returns the next free row.
pub fn render_results(row: usize, items: &[PlaceItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        render_place(current_row, item, theme, cols);
        current_row += PLACE_ITEM_HEIGHT;
    }
    current_row
}

fn render_place(row: usize, item: &PlaceItem, theme: &Theme, cols: usize) {
    let detail_width = cols.saturating_sub(LIST_MARGIN + RANK_WIDTH + 1);

    position_cursor(row, LIST_MARGIN + 1);
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.accent_fg));
    }

    let rank = format!("#{:<width$}", item.rank, width = RANK_WIDTH - 1);
    print!("{rank}");
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{} {}", item.emoji, Theme::bold());

    let name_width = detail_width.saturating_sub(item.match_label.chars().count() + 4);
    let name = truncate(&item.name, name_width);
    helpers::render_highlighted_text(&name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", Theme::reset());
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    }

    // emoji is counted as two cells
    let used = LIST_MARGIN + RANK_WIDTH + 3 + name.chars().count();
    let gap = cols.saturating_sub(used + item.match_label.chars().count() + 1);
    print!("{}", " ".repeat(gap));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.score_fg));
    }
    print!("{}", item.match_label);
    print!("{}", Theme::reset());

    let details: Vec<String> = item
        .location
        .iter()
        .map(|location| format!("📍 {location}"))
        .chain(item.description.iter().cloned())
        .collect();
    position_cursor(row + 1, LIST_MARGIN + RANK_WIDTH + 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", truncate(&details.join("  "), detail_width));
    print!("{}", Theme::reset());

    if !item.tags.is_empty() {
        position_cursor(row + 2, LIST_MARGIN + RANK_WIDTH + 1);
        print!("{}", Theme::fg(&theme.colors.tag_fg));
        print!("{}", truncate(&item.tags.join("  "), detail_width));
        print!("{}", Theme::reset());
    }
}
