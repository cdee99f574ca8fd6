//! Structural grammar for UK postcodes.
//!
//! Every other module consults these predicates instead of re-implementing
//! the shape rules. A full postcode is an outward code (1-2 letters, a digit,
//! an optional trailing letter-or-digit) followed by an inward code (exactly
//! digit + two letters), with any amount of whitespace between the two and
//! around the whole thing. Matching is ASCII case-insensitive throughout:
//! Unicode mode is disabled so case-fold look-alikes such as U+212A KELVIN
//! SIGN never slip past the grammar into byte-indexed decomposition.

/// Check whether `postcode` is a structurally valid full postcode.
///
/// This is purely structural: it says nothing about whether the postcode is
/// actually in use. See [`crate::Directory`] for membership checks.
///
/// # Example
/// ```
/// use pillarbox::is_valid;
///
/// assert!(is_valid("EC1R 1UB"));
/// assert!(is_valid(" sw1a2aa "));
/// assert!(!is_valid("EC1R"));
/// ```
pub fn is_valid(postcode: &str) -> bool {
    regex!(r"(?i-u)^\s*[a-z]{1,2}\d[a-z\d]?\s*\d[a-z]{2}\s*$").is_match(postcode)
}

/// Check whether `outcode` is a structurally valid outward code on its own.
///
/// Unlike [`is_valid`], this expects a bare outward code with no inward part
/// and no surrounding whitespace.
pub fn is_valid_outcode(outcode: &str) -> bool {
    regex!(r"(?i-u)^[a-z]{1,2}\d[a-z\d]?$").is_match(outcode)
}

/// Strip all whitespace and uppercase.
pub(crate) fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_uppercase()
}
