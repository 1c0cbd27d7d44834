//! Canonical serialization of normalized attributes

use crate::model::{CanonicalString, NormalizedAttributes};

/// Separator between `key=value` segments
pub const SEGMENT_SEPARATOR: &str = "|";
/// Separator between a key and its value
pub const KEY_VALUE_SEPARATOR: &str = "=";

/// Serialize as `key=value` segments sorted by key and joined with `|`
pub fn canonicalize(normalized: &NormalizedAttributes) -> CanonicalString {
    let mut entries: Vec<_> = normalized.iter().collect();
    entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

    let segments: Vec<String> = entries
        .into_iter()
        .map(|(attr, value)| format!("{}{}{}", attr, KEY_VALUE_SEPARATOR, clean_value(value)))
        .collect();

    CanonicalString::new(segments.join(SEGMENT_SEPARATOR))
}

/// Remove line breaks and tabs; other whitespace is left alone
fn clean_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect()
}
