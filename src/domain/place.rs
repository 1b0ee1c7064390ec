//! Place and search result domain models.
//!
//! A [`Place`] is one venue returned by the remote search service. A
//! [`SearchResult`] is the envelope for one completed query. Both are built by
//! the search client from the backend payload and are read-only afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Latitude/longitude pair, present only when the backend supplies both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single search result record describing a venue.
///
/// # Fields
///
/// - `id`: opaque identifier, unique within one result set
/// - `name`: display name
/// - `neighborhood`, `description`, `emoji`: optional descriptive fields
/// - `tags`: ordered short labels (may be empty)
/// - `coordinates`: optional location
/// - `score`: relevance in `[0.0, 1.0]`; results keep backend order and the
///   rank shown to the user is the position, not the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub neighborhood: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub tags: Vec<String>,
    pub coordinates: Option<Coordinates>,
    pub score: f64,
}

impl Place {
    /// Creates a place with only the required fields set.
    ///
    /// The score is clamped into `[0.0, 1.0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vibio::domain::Place;
    ///
    /// let place = Place::new("p1", "Blue Bottle", 0.92);
    /// assert_eq!(place.match_percent(), 92);
    /// assert!(place.tags.is_empty());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            neighborhood: None,
            description: None,
            emoji: None,
            tags: Vec::new(),
            coordinates: None,
            score: clamp_score(score),
        }
    }

    /// Relevance as a whole percentage, rounded half away from zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn match_percent(&self) -> u8 {
        (clamp_score(self.score) * 100.0).round() as u8
    }
}

/// Clamps a backend score into `[0.0, 1.0]`, mapping NaN to `0.0`.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Envelope for one completed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Places in backend relevance order.
    pub places: Vec<Place>,

    /// Natural-language commentary; `None` means the backend sent none.
    pub assistant_text: Option<String>,

    /// The exact query string that produced this result.
    pub query: String,

    /// Backend-reported total, `places.len()` when the backend omits it.
    pub total_results: usize,
}

impl SearchResult {
    /// Builds a result whose total equals the number of places.
    #[must_use]
    pub fn new(query: impl Into<String>, places: Vec<Place>, assistant_text: Option<String>) -> Self {
        let total_results = places.len();
        Self {
            places,
            assistant_text,
            query: query.into(),
            total_results,
        }
    }
}

/// Search variant requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Fast lookup.
    #[default]
    Quick,
    /// Slower, more thorough search.
    Deep,
}

impl SearchMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Quick => Self::Deep,
            Self::Deep => Self::Quick,
        }
    }

    /// Wire representation of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "deep" => Ok(Self::Deep),
            other => Err(format!("unknown search mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_clamped() {
        assert!((Place::new("a", "A", 1.7).score - 1.0).abs() < f64::EPSILON);
        assert!(Place::new("b", "B", -0.2).score.abs() < f64::EPSILON);
        assert!(clamp_score(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn match_percent_rounds() {
        assert_eq!(Place::new("a", "A", 0.925).match_percent(), 93);
        assert_eq!(Place::new("a", "A", 0.0).match_percent(), 0);
        assert_eq!(Place::new("a", "A", 1.0).match_percent(), 100);
    }

    #[test]
    fn mode_parses_and_toggles() {
        assert_eq!("Deep".parse::<SearchMode>(), Ok(SearchMode::Deep));
        assert_eq!(" quick ".parse::<SearchMode>(), Ok(SearchMode::Quick));
        assert!("slow".parse::<SearchMode>().is_err());
        assert_eq!(SearchMode::Quick.toggled(), SearchMode::Deep);
        assert_eq!(SearchMode::Deep.to_string(), "deep");
    }
}
