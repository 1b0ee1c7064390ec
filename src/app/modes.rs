//! Input focus modes.
//!
//! The plugin has one text input and one result list. [`InputMode`] decides
//! which of the two receives keystrokes:
//!
//! - **Editing**: characters go into the query, `Enter` submits, `Tab` applies
//!   a suggestion
//! - **Browsing**: `j`/`k` scroll the result list, `/` or `i` return to the
//!   input, `q` closes the plugin

/// Which surface receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing into the search input.
    #[default]
    Editing,

    /// Navigating the revealed result list.
    Browsing,
}

impl InputMode {
    /// Whether keystrokes are typed into the query.
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }
}
