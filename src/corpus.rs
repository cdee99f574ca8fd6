//! Scanning free text for postcode-shaped substrings.
//!
//! Two patterns, both unanchored and case-insensitive: the strict one only
//! matches substrings that already satisfy the postcode grammar, the
//! tolerant one additionally accepts `0`/`o` and `1`/`i` interchangeably in
//! the slots where either could plausibly appear. Matches are yielded in
//! left-to-right order of appearance.

/// Yield raw postcode candidates found in `text`, left to right.
///
/// With `tolerant` set, substrings with letter/digit confusion are also
/// matched so they can be handed to the fixer downstream.
pub(crate) fn scan(text: &str, tolerant: bool) -> impl Iterator<Item = &str> {
    let pattern = if tolerant {
        regex!(r"(?i-u)[a-z01]{1,2}[0-9oi][a-z\d]?\s*[0-9oi][a-z01]{2}")
    } else {
        regex!(r"(?i-u)[a-z]{1,2}\d[a-z\d]?\s*\d[a-z]{2}")
    };
    pattern.find_iter(text).map(|m| m.as_str())
}
