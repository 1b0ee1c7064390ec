//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents, either built in or loaded from a user file.
//!
//! # Built-in Themes
//!
//! - `vibio-dark`: deep indigo background accents (default)
//! - `vibio-light`: for light terminal backgrounds
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0def4"
//! selection_fg = "#191724"
//! selection_bg = "#c4a7e7"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#403d52"
//! search_bar_border = "#c4a7e7"
//! match_highlight_fg = "#191724"
//! match_highlight_bg = "#f6c177"
//! empty_state_fg = "#9ccfd8"
//! accent_fg = "#c4a7e7"
//! score_fg = "#a6e3a1"
//! tag_fg = "#9ccfd8"
//! error_fg = "#eb6f92"
//! ```

use crate::domain::error::{Result, VibioError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#e0def4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected place foreground color.
    pub selection_fg: String,
    /// Selected place background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, captions, descriptions).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search box border color.
    pub search_bar_border: String,
    /// Match highlight foreground.
    pub match_highlight_fg: String,
    /// Match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Mode badge, rank and typing cursor.
    pub accent_fg: String,
    /// `NN% match` badge.
    pub score_fg: String,
    /// Place tags.
    pub tag_fg: String,
    /// Failure status line.
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the theme name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vibio::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("vibio-light").unwrap();
    /// assert_eq!(theme.name, "vibio-light");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "vibio-dark" => include_str!("../../themes/vibio-dark.toml"),
            "vibio-light" => include_str!("../../themes/vibio-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VibioError::Io`] if the file cannot be read and
    /// [`VibioError::Theme`] if its content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| VibioError::Theme(format!("invalid theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple, white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// ANSI dim.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// ANSI reset; clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`vibio-dark`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(crate::DEFAULT_THEME)
            .expect("Built-in vibio-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "vibio-dark");
        assert!(Theme::from_name("vibio-light").is_some());
    }

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_overrides_and_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("dusk.toml");
        let mut theme = Theme::default();
        theme.name = "dusk".to_string();
        theme.colors.accent_fg = "#ff00ff".to_string();
        fs::write(&good, toml::to_string(&theme).unwrap()).unwrap();

        let loaded = Theme::from_file(&good).unwrap();
        assert_eq!(loaded.name, "dusk");
        assert_eq!(loaded.colors.accent_fg, "#ff00ff");

        let bad = dir.path().join("broken.toml");
        fs::write(&bad, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(&bad), Err(VibioError::Theme(_))));
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(VibioError::Io(_))
        ));
    }
}
