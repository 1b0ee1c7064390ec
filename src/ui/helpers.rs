//! Shared rendering utilities.
//!
//! Cursor positioning and highlighted text output write ANSI sequences to
//! stdout. Wrapping, truncation and range coalescing are pure and used while
//! building view models.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` centered on `row`, padded to `cols` so `style` covers the line.
///
/// Text wider than the line is truncated.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let width = text.chars().count();
    let left = (cols - width) / 2;

    position_cursor(row, 1);
    print!(
        "{style}{:left$}{text}{:right$}{}",
        "",
        "",
        Theme::reset(),
        right = cols - width - left,
    );
}

/// Renders text with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices with an exclusive end. When the
/// item is selected, the selection colors win and nothing is highlighted.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Merges sorted character indices into `(start, end)` runs.
///
/// ```
/// use vibio::ui::helpers::coalesce_ranges;
///
/// assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
/// ```
#[must_use]
pub fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in sorted {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Cuts `text` to at most `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let kept: String = text.chars().take(width - 3).collect();
    format!("{}...", kept.trim_end())
}

/// Word-wraps `text` into lines of at most `width` characters.
///
/// Explicit newlines start a new line. Words longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        lines.push(line);
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap_text("Based on your vibe, try these", 12),
            vec!["Based on", "your vibe,", "try these"]
        );
    }

    #[test]
    fn wrap_keeps_paragraphs_and_splits_long_words() {
        assert_eq!(wrap_text("ab\ncdefgh", 4), vec!["ab", "cdef", "gh"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Café Reverie", 20), "Café Reverie");
        assert_eq!(truncate("Café Reverie", 8), "Café...");
    }

    #[test]
    fn coalesce_ignores_order_and_duplicates() {
        assert_eq!(coalesce_ranges(&[4, 3, 3, 0]), vec![(0, 1), (3, 5)]);
        assert!(coalesce_ranges(&[]).is_empty());
    }
}
