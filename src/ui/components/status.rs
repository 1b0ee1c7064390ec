//! Status line renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

const STATUS_MARGIN: usize = 3;

/// Renders the status line (or a blank line) at `row` and returns the next row.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));

    let Some(status) = status else {
        return row + 1;
    };

    let (color, marker) = match status.kind {
        StatusKind::Info => (&theme.colors.text_dim, "✓"),
        StatusKind::Loading => (&theme.colors.accent_fg, "…"),
        StatusKind::Error => (&theme.colors.error_fg, "✗"),
    };

    position_cursor(row, STATUS_MARGIN + 1);
    print!("{}", Theme::fg(color));
    print!(
        "{marker} {}",
        truncate(&status.message, cols.saturating_sub(STATUS_MARGIN * 2 + 2))
    );
    print!("{}", Theme::reset());
    row + 1
}
