//! Conversion of textual identifiers (path segments, query values) into store ids.
//!
//! Lenient coercion maps anything that is not a non-negative `i32` to `0`.
//! No row ever has id `0`, so a coerced id surfaces as not-found instead of
//! touching a real record.

/// Parses `raw` as a store id, returning `None` for anything that is not a
/// non-negative integer in range.
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id >= 0)
}

/// Lenient form of [`parse_id`]: invalid input becomes `0`.
pub fn string_to_id(raw: &str) -> i32 {
    parse_id(raw).unwrap_or(0)
}

/// Applies [`string_to_id`] to every element, keeping order and length.
pub fn strings_to_ids<S: AsRef<str>>(raw: &[S]) -> Vec<i32> {
    raw.iter().map(|s| string_to_id(s.as_ref())).collect()
}
