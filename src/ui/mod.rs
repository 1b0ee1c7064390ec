//! User interface rendering layer.
//!
//! The UI renders whatever the query session and the reveal schedulers
//! currently hold; it never changes state.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Cursor positioning, highlighting, wrapping, truncation
//! - [`icons`]: Place and tag emoji lookups
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod icons;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    AssistantPanel, EmptyState, FooterInfo, HeaderInfo, PlaceItem, SearchBarInfo, StatusKind,
    StatusLine, SuggestionItem, UIViewModel,
};
