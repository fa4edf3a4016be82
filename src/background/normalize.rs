//! Condition Normalizer
//!
//! Turns a weather-condition token into the photo search query used both as
//! the upstream search term and as the cache key.

/// Conditions with a hand-picked search phrase, keyed by lower-case token.
const CONDITION_QUERIES: &[(&str, &str)] = &[
    ("clear", "sunny weather"),
    ("rain", "rainy day"),
];

/// Maps a condition to its search query.
///
/// Lookup is case-insensitive. Unmapped conditions pass through with their
/// original casing.
pub fn normalize_condition(condition: &str) -> String {
    let lowered = condition.to_lowercase();
    CONDITION_QUERIES
        .iter()
        .find(|(token, _)| *token == lowered)
        .map(|(_, query)| query.to_string())
        .unwrap_or_else(|| condition.to_string())
}
