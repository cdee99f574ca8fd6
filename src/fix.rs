//! Repair of near-miss postcodes with letter/digit confusion.
//!
//! OCR and fat fingers routinely swap `0`/`O` and `1`/`I`. This module takes
//! a string that is postcode-shaped up to those confusions and reinterprets
//! each ambiguous character by position, according to what the grammar
//! expects there.
//!
//! The engine is a lock-step walk of a code segment against a
//! [`CoercionTemplate`]: a per-position expectation of `Letter`, `Digit`, or
//! `Any`. The inward code always expects digit-letter-letter. The outward
//! code depends on its length:
//!
//! - 2 characters: letter + digit, never ambiguous.
//! - 3 characters: the middle slot could be the district digit or the second
//!   area letter, so single-result mode only pins the first slot and
//!   all-options mode tries every legal template.
//! - 4 characters: the leading two slots must be letters and the third the
//!   district digit; only the trailing slot stays ambiguous.
//!
//! [`fix`] picks one best-guess reading; [`fix_with_options`] surfaces every
//! grammatically legal reading instead.

use crate::grammar::{is_valid_outcode, sanitize};

/// Per-position expectation used when repairing a code segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Letter,
    Digit,
    Any,
}

/// A fixed-length pattern of [`Slot`]s selected by segment length.
type CoercionTemplate = &'static [Slot];

use Slot::{Any, Digit, Letter};

/// Convert a digit to its look-alike letter: `0` => `O`, `1` => `I`.
fn to_letter(c: char) -> char {
    match c {
        '0' => 'O',
        '1' => 'I',
        _ => c,
    }
}

/// Convert a letter to its look-alike digit: `O` => `0`, `I` => `1`.
fn to_number(c: char) -> char {
    match c {
        'O' => '0',
        'I' => '1',
        _ => c,
    }
}

/// Walk `code` and `template` in lock-step, coercing each character toward
/// the slot's expectation. `Any` slots pass characters through untouched.
fn coerce(template: CoercionTemplate, code: &str) -> String {
    code.chars()
        .zip(template)
        .map(|(c, slot)| match slot {
            Letter => to_letter(c),
            Digit => to_number(c),
            Any => c,
        })
        .collect()
}

/// Best-guess coercion of an outward code. Lengths other than 2/3/4 pass
/// through unchanged.
fn coerce_outcode(outcode: &str) -> String {
    match outcode.chars().count() {
        2 => coerce(&[Letter, Digit], outcode),
        3 => coerce(&[Letter, Any, Any], outcode),
        4 => coerce(&[Letter, Letter, Digit, Any], outcode),
        _ => outcode.to_string(),
    }
}

/// Every legal coercion of an outward code, deduplicated.
///
/// Candidates that fail the outward-code grammar are discarded; several
/// templates often coerce to the same string.
fn coerce_outcode_options(outcode: &str) -> Vec<String> {
    let templates: &[CoercionTemplate] = match outcode.chars().count() {
        3 => &[
            &[Letter, Digit, Letter],
            &[Letter, Digit, Digit],
            &[Letter, Letter, Digit],
        ],
        4 => &[
            &[Letter, Letter, Digit, Letter],
            &[Letter, Letter, Digit, Digit],
        ],
        _ => return vec![coerce_outcode(outcode)],
    };

    let mut options = Vec::new();
    for template in templates {
        let candidate = coerce(template, outcode);
        if is_valid_outcode(&candidate) && !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options
}

/// Coerce an inward code, which is always digit-letter-letter.
fn coerce_incode(incode: &str) -> String {
    coerce(&[Digit, Letter, Letter], incode)
}

/// A postcode-shaped string where digit/letter confusion is the only defect.
///
/// Identical to the full postcode grammar except that `0`/`o` and `1`/`i`
/// are interchangeable wherever either reading could apply.
fn is_fixable(postcode: &str) -> bool {
    regex!(r"(?i-u)^\s*[a-z01]{1,2}[0-9oi][a-z\d]?\s*[0-9oi][a-z01]{2}\s*$").is_match(postcode)
}

/// Attempt to repair `postcode`, returning a single best-guess reading.
///
/// Unfixable input is returned verbatim, so callers can detect failure by
/// re-validating the result.
///
/// # Example
/// ```
/// use pillarbox::fix;
///
/// assert_eq!(fix(" Sw1A2aa "), "SW1A 2AA");
/// assert_eq!(fix("SWIA 2AA"), "SW1A 2AA");
/// assert_eq!(fix("not a postcode"), "not a postcode");
/// ```
pub fn fix(postcode: &str) -> String {
    if !is_fixable(postcode) {
        return postcode.to_string();
    }
    let s = sanitize(postcode);
    let (outward, inward) = s.split_at(s.len() - 3);
    format!("{} {}", coerce_outcode(outward), coerce_incode(inward))
}

/// Attempt to repair `postcode`, returning every plausible reading.
///
/// Where [`fix`] guesses one interpretation of an ambiguous outward code,
/// this returns all of them. Unfixable input yields the original string as
/// the single element.
///
/// # Example
/// ```
/// use pillarbox::fix_with_options;
///
/// let options = fix_with_options("OOO 4SS");
/// assert_eq!(options.len(), 3);
/// assert!(options.contains(&"O0O 4SS".to_string()));
/// ```
pub fn fix_with_options(postcode: &str) -> Vec<String> {
    if !is_fixable(postcode) {
        return vec![postcode.to_string()];
    }
    let s = sanitize(postcode);
    let (outward, inward) = s.split_at(s.len() - 3);
    let inward = coerce_incode(inward);
    coerce_outcode_options(outward).into_iter().map(|o| format!("{o} {inward}")).collect()
}
