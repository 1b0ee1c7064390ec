//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, client and
//! reveal layers. The runtime turns host events into [`Event`]s, the handler
//! mutates [`AppState`], and the returned [`Action`]s are executed by the
//! runtime.
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └── SearchResponse / RevealTick ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordination
//! - [`modes`]: Input focus modes
//! - [`session`]: Query lifecycle state machine with the superseding rule
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;
pub mod state;

#[cfg(test)]
mod scenarios;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use session::{DiscardReason, SearchStatus, SessionState, Transition};
pub use state::AppState;
