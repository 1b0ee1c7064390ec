//! Domain layer for the Vibio plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or the rendering layer.
//!
//! # Organization
//!
//! - [`error`]: Error types, search failure taxonomy and result aliases
//! - [`place`]: Place records, search results and search modes
//!
//! # Examples
//!
//! ```
//! use vibio::domain::{Place, SearchResult};
//!
//! let result = SearchResult::new(
//!     "coffee shops",
//!     vec![Place::new("p1", "Blue Bottle", 0.92)],
//!     Some("Based on your vibe...".to_string()),
//! );
//! assert_eq!(result.total_results, 1);
//! ```

pub mod error;
pub mod place;

pub use error::{ClientError, Result, SearchFailure, VibioError, GENERIC_SEARCH_FAILURE};
pub use place::{Coordinates, Place, SearchMode, SearchResult};
