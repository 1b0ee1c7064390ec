//! Wire payloads exchanged with the search backend and their normalization.
//!
//! The backend answers `POST /search` with:
//!
//! ```json
//! {
//!   "places": [{ "place_id": "p1", "name": "Blue Bottle", "score": 0.92 }],
//!   "llm_response": "Based on your vibe...",
//!   "total_results": 1,
//!   "query": "coffee shops"
//! }
//! ```
//!
//! Every field is optional on the wire. Normalization turns the payload into a
//! [`SearchResult`] and never fails on a missing optional field; only a body
//! that is not a JSON object is rejected.

use crate::domain::place::clamp_score;
use crate::domain::{ClientError, Coordinates, Place, SearchResult};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// Top-level success body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default, alias = "results")]
    pub places: Option<Vec<PlacePayload>>,
    #[serde(default)]
    pub llm_response: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub query: Option<String>,
}

/// One place as sent by the backend.
#[derive(Debug, Default, Deserialize)]
pub struct PlacePayload {
    #[serde(default, alias = "id")]
    pub place_id: Option<JsonValue>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "emojis")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub tags: Option<TagsField>,
    #[serde(default, alias = "hybrid_score")]
    pub score: Option<f64>,
}

/// Tags arrive either as a list or as the legacy packed form `"{cafe,bar}"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    List(Vec<String>),
    Packed(String),
}

impl TagsField {
    /// Flattens both representations into trimmed, non-empty labels.
    #[must_use]
    pub fn into_labels(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Self::List(items) => items,
            Self::Packed(packed) => packed
                .trim()
                .trim_start_matches('{')
                .trim_end_matches('}')
                .split(',')
                .map(String::from)
                .collect(),
        };

        raw.into_iter()
            .map(|tag| tag.trim().trim_matches('"').trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Decodes a success body into a [`SearchResult`] for `query`.
///
/// # Errors
///
/// Returns [`ClientError::Decode`] when the body is not a JSON object matching
/// the payload shape.
pub fn decode_search_result(query: &str, body: &[u8]) -> Result<SearchResult, ClientError> {
    let payload: SearchPayload =
        serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))?;

    if let Some(echo) = payload.query.as_deref() {
        if echo != query {
            tracing::debug!(query = %query, echoed = %echo, "backend echoed a different query");
        }
    }

    let places = normalize_places(payload.places.unwrap_or_default());
    let assistant_text = payload.llm_response.and_then(non_blank);
    let total_results = payload
        .total_results
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(places.len());

    Ok(SearchResult {
        places,
        assistant_text,
        query: query.to_string(),
        total_results,
    })
}

/// Converts wire places, dropping unusable records and duplicate ids.
///
/// Order is preserved; the first occurrence of an id wins.
fn normalize_places(raw: Vec<PlacePayload>) -> Vec<Place> {
    let mut seen = HashSet::new();
    let mut places = Vec::with_capacity(raw.len());

    for (position, payload) in raw.into_iter().enumerate() {
        let Some(place) = normalize_place(payload) else {
            tracing::warn!(position, "dropping place without id or name");
            continue;
        };

        if !seen.insert(place.id.clone()) {
            tracing::warn!(place_id = %place.id, position, "dropping duplicate place id");
            continue;
        }

        places.push(place);
    }

    places
}

fn normalize_place(payload: PlacePayload) -> Option<Place> {
    let id = payload.place_id.as_ref().and_then(id_text)?;
    let name = payload.name.and_then(non_blank)?;

    let coordinates = match (payload.latitude, payload.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
        _ => None,
    };

    Some(Place {
        id,
        name,
        neighborhood: payload.neighborhood.and_then(non_blank),
        description: payload.description.and_then(non_blank),
        emoji: payload.emoji.and_then(non_blank),
        tags: payload.tags.map(TagsField::into_labels).unwrap_or_default(),
        coordinates,
        score: clamp_score(payload.score.unwrap_or(0.0)),
    })
}

/// Ids may be strings or numbers on the wire.
fn id_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => non_blank(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload_normalizes() {
        let body = r#"{
            "places": [{
                "place_id": "p1",
                "name": "Blue Bottle",
                "neighborhood": "Chelsea",
                "latitude": 40.74,
                "longitude": -74.0,
                "tags": ["cafe", "book_store"],
                "emoji": "☕",
                "score": 0.92
            }],
            "llm_response": "Based on your vibe...",
            "total_results": 7,
            "query": "coffee shops"
        }"#;

        let result = decode_search_result("coffee shops", body.as_bytes()).expect("decodes");

        assert_eq!(result.places.len(), 1);
        let place = &result.places[0];
        assert_eq!(place.id, "p1");
        assert_eq!(place.neighborhood.as_deref(), Some("Chelsea"));
        assert_eq!(place.emoji.as_deref(), Some("☕"));
        assert_eq!(place.tags, vec!["cafe", "book_store"]);
        assert!(place.coordinates.is_some());
        assert_eq!(result.assistant_text.as_deref(), Some("Based on your vibe..."));
        assert_eq!(result.total_results, 7);
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let result = decode_search_result("bars", b"{}").expect("empty object is valid");
        assert!(result.places.is_empty());
        assert!(result.assistant_text.is_none());
        assert_eq!(result.total_results, 0);
        assert_eq!(result.query, "bars");
    }

    #[test]
    fn blank_assistant_text_means_none() {
        let result = decode_search_result("q", br#"{"places": [], "llm_response": "  "}"#).unwrap();
        assert!(result.assistant_text.is_none());
    }

    #[test]
    fn packed_legacy_tags_are_split() {
        let tags: TagsField = serde_json::from_str(r#""{cafe, night_club,,}""#).unwrap();
        assert_eq!(tags.into_labels(), vec!["cafe", "night_club"]);
    }

    #[test]
    fn duplicate_and_unusable_places_are_dropped_in_order() {
        let body = br#"{"places": [
            {"id": "a", "name": "First", "score": 0.5},
            {"id": "b", "score": 0.4},
            {"id": "a", "name": "Again", "score": 0.3},
            {"id": 42, "name": "Numeric", "score": 2.0},
            {"name": "No id"}
        ]}"#;

        let result = decode_search_result("q", body).unwrap();
        let names: Vec<&str> = result.places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Numeric"]);
        assert_eq!(result.places[1].id, "42");
        assert!((result.places[1].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_coordinate_is_not_a_location() {
        let body = br#"{"places": [{"id": "a", "name": "A", "latitude": 1.0}]}"#;
        let result = decode_search_result("q", body).unwrap();
        assert!(result.places[0].coordinates.is_none());
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = decode_search_result("q", b"<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
