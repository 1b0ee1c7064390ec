//! Static emoji lookups for places and tags.
//!
//! Tags arrive as raw labels such as `book_store` or `Cafe`. They are shown as
//! an emoji followed by a title-cased label (`📖 Book Store`). Unknown tags get
//! [`FALLBACK_TAG_EMOJI`], places without an emoji get [`FALLBACK_PLACE_EMOJI`].

use crate::domain::Place;

/// Shown for places that carry no emoji.
pub const FALLBACK_PLACE_EMOJI: &str = "📍";

/// Shown for tags missing from the table.
pub const FALLBACK_TAG_EMOJI: &str = "🏷️";

/// Normalized tag key to emoji.
const TAG_EMOJI: &[(&str, &str)] = &[
    ("shop", "🛍️"),
    ("cafe", "☕️"),
    ("park", "🌳"),
    ("restaurant", "🍽️"),
    ("museum", "🏛️"),
    ("beach", "🏖️"),
    ("bar", "🍻"),
    ("hotel", "🏨"),
    ("gallery", "🖼️"),
    ("theater", "🎭"),
    ("hiking", "🥾"),
    ("bookstore", "📚"),
    ("vintage", "🧥"),
    ("dessert", "🍰"),
    ("bakery", "🥐"),
    ("nature", "🌲"),
    ("night_club", "🌃"),
    ("health", "🏥"),
    ("culture", "🎨"),
    ("book_store", "📖"),
];

fn tag_key(tag: &str) -> String {
    tag.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Emoji for `tag`, matched case-insensitively with spaces and underscores
/// treated alike.
#[must_use]
pub fn tag_emoji(tag: &str) -> &'static str {
    let key = tag_key(tag);
    TAG_EMOJI
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(FALLBACK_TAG_EMOJI, |(_, emoji)| emoji)
}

/// Human label for `tag`: underscores become spaces, words are title-cased.
///
/// ```
/// use vibio::ui::icons::tag_label;
///
/// assert_eq!(tag_label("book_store"), "Book Store");
/// assert_eq!(tag_label("CAFE"), "Cafe");
/// ```
#[must_use]
pub fn tag_label(tag: &str) -> String {
    tag_key(tag)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emoji and label of `tag`, as rendered in the result list.
#[must_use]
pub fn format_tag(tag: &str) -> String {
    format!("{} {}", tag_emoji(tag), tag_label(tag))
}

/// The place's own emoji, or the pin fallback.
#[must_use]
pub fn place_emoji(place: &Place) -> &str {
    place
        .emoji
        .as_deref()
        .map(str::trim)
        .filter(|emoji| !emoji.is_empty())
        .unwrap_or(FALLBACK_PLACE_EMOJI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_resolve_regardless_of_spelling() {
        assert_eq!(tag_emoji("cafe"), "☕️");
        assert_eq!(tag_emoji("Night Club"), "🌃");
        assert_eq!(tag_emoji("book_store"), "📖");
        assert_eq!(tag_emoji("bookstore"), "📚");
    }

    #[test]
    fn unknown_tags_fall_back() {
        assert_eq!(tag_emoji("laundromat"), FALLBACK_TAG_EMOJI);
        assert_eq!(format_tag("late_night"), "🏷️ Late Night");
    }

    #[test]
    fn places_without_emoji_get_a_pin() {
        let mut place = Place::new("p1", "Blue Bottle", 0.9);
        assert_eq!(place_emoji(&place), FALLBACK_PLACE_EMOJI);

        place.emoji = Some(" ".to_string());
        assert_eq!(place_emoji(&place), FALLBACK_PLACE_EMOJI);

        place.emoji = Some("☕".to_string());
        assert_eq!(place_emoji(&place), "☕");
    }
}
