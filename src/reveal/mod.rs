//! Progressive disclosure of search results.
//!
//! Two independent reveal instances pace already-available data to simulate
//! live generation:
//!
//! - [`TextReveal`]: the assistant text, one character per tick
//! - [`ListReveal`]: the place list, one item per tick
//!
//! # Modules
//!
//! - [`scheduler`]: generic cancellable reveal scheduler and tick protocol
//! - [`timers`]: host timer bookkeeping used by the plugin runtime
//!
//! # Example
//!
//! ```rust
//! use vibio::reveal::{TextReveal, RevealChannel, TickOutcome, DEFAULT_TEXT_INTERVAL};
//!
//! let mut reveal = TextReveal::new(RevealChannel::Text, DEFAULT_TEXT_INTERVAL);
//! let mut pending = reveal.start("hey".to_string());
//! while let Some(tick) = pending {
//!     pending = match reveal.tick(tick.token) {
//!         TickOutcome::Continue(next) => Some(next),
//!         _ => None,
//!     };
//! }
//! assert_eq!(reveal.visible(), "hey");
//! ```

pub mod scheduler;
pub mod timers;

use crate::domain::Place;
use std::time::Duration;

pub use scheduler::{
    RevealChannel, RevealScheduler, RevealToken, Revealable, ScheduledTick, TickOutcome,
};
pub use timers::TimerQueue;

/// Default tick period of the text reveal.
pub const DEFAULT_TEXT_INTERVAL: Duration = Duration::from_millis(20);

/// Default tick period of the list reveal.
pub const DEFAULT_LIST_INTERVAL: Duration = Duration::from_millis(300);

/// Character-by-character reveal of the assistant text.
pub type TextReveal = RevealScheduler<String>;

/// Item-by-item reveal of the place list.
pub type ListReveal = RevealScheduler<Vec<Place>>;
