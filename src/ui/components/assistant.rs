//! Assistant commentary panel renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::AssistantPanel;

const PANEL_MARGIN: usize = 3;

/// Typing cursor drawn after the last revealed character.
const TYPING_CURSOR: &str = "▍";

/// Renders the wrapped assistant text and its caption starting at `row`.
///
/// Returns the row after the caption.
pub fn render_assistant(row: usize, panel: &AssistantPanel, theme: &Theme) -> usize {
    let mut current_row = row;
    let last = panel.lines.len().saturating_sub(1);

    for (i, line) in panel.lines.iter().enumerate() {
        position_cursor(current_row, PANEL_MARGIN + 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{line}");
        if panel.typing && i == last {
            print!("{}{TYPING_CURSOR}", Theme::fg(&theme.colors.accent_fg));
        }
        print!("{}", Theme::reset());
        current_row += 1;
    }

    position_cursor(current_row, PANEL_MARGIN + 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}", panel.caption);
    print!("{}", Theme::reset());

    current_row + 1
}
