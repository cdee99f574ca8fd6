use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::corpus;
use crate::directory::{Directory, EmptyDirectory};
use crate::fix::{fix, fix_with_options};
use crate::grammar::is_valid;
use crate::postcode::Postcode;

/// Parsing context.
///
/// Holds the read-only collaborators a parse needs, currently just the
/// postcode [`Directory`] used to tag records with membership. There is no
/// process-wide mutable state: callers that want a real snapshot construct a
/// context around one and pass it to the `*_with` functions.
#[derive(Clone)]
pub struct Context {
    /// Directory snapshot consulted once per successful parse.
    pub directory: Arc<dyn Directory>,
}

impl Default for Context {
    fn default() -> Self {
        Self { directory: Arc::new(EmptyDirectory) }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

/// Options that affect parsing behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Attempt to repair letter/digit confusion when the input is not
    /// already valid. Defaults to `true`.
    pub attempt_fix: bool,
    /// In corpus scans, keep every plausible reading of an ambiguous
    /// candidate instead of a single best guess. Requires `attempt_fix`.
    /// Defaults to `false`.
    pub try_all_fix_options: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { attempt_fix: true, try_all_fix_options: false }
    }
}

impl Options {
    /// Reject contradictory flag combinations before any parsing work.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.try_all_fix_options && !self.attempt_fix {
            return Err(OptionsError::AllOptionsWithoutFix);
        }
        Ok(())
    }
}

/// A configuration-contract violation in [`Options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// `try_all_fix_options` was requested without `attempt_fix`.
    #[error("`try_all_fix_options` requires `attempt_fix`")]
    AllOptionsWithoutFix,
}

/// Parse a single postcode with default context and options.
///
/// Repair is attempted when the input is not already valid; `None` is an
/// expected, common outcome for arbitrary text.
///
/// # Example
/// ```
/// use pillarbox::parse;
///
/// let p = parse("ec1r   1ub").unwrap();
/// assert_eq!(p.postcode, "EC1R 1UB");
/// assert_eq!(p.district, "EC1");
///
/// assert!(parse("not a postcode").is_none());
/// ```
pub fn parse(text: &str) -> Option<Postcode> {
    parse_with(text, &Context::default(), &Options::default())
}

/// Parse a single postcode using the provided `context`/`options`.
///
/// Already-valid input is decomposed directly. Otherwise, when
/// `options.attempt_fix` is set, the single best-guess repair is tried; if
/// that still fails validation the parse fails. `options.try_all_fix_options`
/// does not apply here — use [`parse_all_options_with`] to keep every
/// reading.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> Option<Postcode> {
    if is_valid(text) {
        return Postcode::build(text, text, context.directory.as_ref());
    }
    if options.attempt_fix {
        let fixed = fix(text);
        if is_valid(&fixed) {
            info!("postcode fixed: {text:?} => {fixed:?}");
            return Postcode::build(text, &fixed, context.directory.as_ref());
        }
        debug!("unable to fix postcode: {text:?}");
    }
    debug!("failed to parse postcode: {text:?}");
    None
}

/// Parse a single postcode, keeping every plausible reading, with a default
/// context.
pub fn parse_all_options(text: &str) -> Vec<Postcode> {
    parse_all_options_with(text, &Context::default())
}

/// Parse a single postcode, keeping every plausible reading.
///
/// Already-valid input yields its single decomposition. Otherwise each
/// candidate from [`fix_with_options`] that validates is decomposed;
/// candidates that fail are silently dropped (the coercer should only emit
/// grammar-valid strings, but validity is re-checked at decomposition
/// regardless). Results are sorted by ascending [`Postcode::fix_distance`],
/// most confident first.
pub fn parse_all_options_with(text: &str, context: &Context) -> Vec<Postcode> {
    if is_valid(text) {
        return Postcode::build(text, text, context.directory.as_ref()).into_iter().collect();
    }
    let mut records: Vec<Postcode> = fix_with_options(text)
        .iter()
        .filter(|fixed| is_valid(fixed))
        .filter_map(|fixed| Postcode::build(text, fixed, context.directory.as_ref()))
        .collect();
    records.sort_by_key(|p| p.fix_distance);
    records
}

/// Scan a text corpus for postcodes with a strict (no-repair) pattern and a
/// default context.
///
/// Matches appear in left-to-right order. Equivalent to
/// [`parse_from_corpus_with`] with `attempt_fix` disabled, which is why this
/// variant cannot fail.
///
/// # Example
/// ```
/// use pillarbox::parse_from_corpus;
///
/// let found = parse_from_corpus("codes liek thia ec1r   1ub , and that e3 4ss.");
/// let codes: Vec<&str> = found.iter().map(|p| p.postcode.as_str()).collect();
/// assert_eq!(codes, vec!["EC1R 1UB", "E3 4SS"]);
/// ```
pub fn parse_from_corpus(text: &str) -> Vec<Postcode> {
    let options = Options { attempt_fix: false, try_all_fix_options: false };
    parse_from_corpus_with(text, &Context::default(), &options)
        .expect("options cannot be contradictory")
}

/// Scan a text corpus for postcodes using the provided `context`/`options`.
///
/// With `attempt_fix` the scan pattern additionally tolerates letter/digit
/// confusion and each candidate goes through the fixer; with
/// `try_all_fix_options` every plausible reading of each candidate is kept
/// (grouped at the candidate's position, most confident first). Candidates
/// that fail to parse are dropped. The contradictory flag combination is
/// rejected before any scanning happens.
pub fn parse_from_corpus_with(
    text: &str,
    context: &Context,
    options: &Options,
) -> Result<Vec<Postcode>, OptionsError> {
    options.validate()?;

    let candidates: Vec<&str> = corpus::scan(text, options.attempt_fix).collect();
    info!("found {} postcode candidates in corpus", candidates.len());

    let mut records = Vec::new();
    for candidate in candidates {
        if options.try_all_fix_options {
            records.extend(parse_all_options_with(candidate, context));
        } else if let Some(record) = parse_with(candidate, context, options) {
            records.push(record);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SetDirectory;

    fn snapshot_context(codes: &[&str]) -> Context {
        Context { directory: Arc::new(SetDirectory::new(codes.iter().copied())) }
    }

    #[test]
    fn parse_valid_postcode() {
        let p = parse("ec1r 1ub").unwrap();
        assert_eq!(p.original, "ec1r 1ub");
        assert_eq!(p.postcode, "EC1R 1UB");
        assert_eq!(p.incode, "1UB");
        assert_eq!(p.outcode, "EC1R");
        assert_eq!(p.area, "EC");
        assert_eq!(p.district, "EC1");
        assert_eq!(p.sub_district.as_deref(), Some("EC1R"));
        assert_eq!(p.sector, "EC1R 1");
        assert_eq!(p.unit, "UB");
        assert_eq!(p.fix_distance, 0);
    }

    #[test]
    fn parse_repairs_confused_characters() {
        let p = parse("SWIA 2AA").unwrap();
        assert_eq!(p.postcode, "SW1A 2AA");
        assert_eq!(p.original, "SWIA 2AA");
        assert_eq!(p.fix_distance, 1);
    }

    #[test]
    fn parse_without_fix_rejects_near_misses() {
        let options = Options { attempt_fix: false, ..Options::default() };
        assert!(parse_with("SWIA 2AA", &Context::default(), &options).is_none());
        assert!(parse_with("SW1A 2AA", &Context::default(), &options).is_some());
    }

    #[test]
    fn parse_fails_on_unfixable_input() {
        assert!(parse(" 1A2aa ").is_none());
        assert!(parse("ei412").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn parse_survives_unicode_case_fold_look_alikes() {
        // U+212A KELVIN SIGN and U+017F LONG S case-fold to 'k'/'s' but are
        // multi-byte; they must be rejected up front, not crash the
        // byte-indexed decomposer.
        assert!(parse("e1 2\u{212A}\u{017F}").is_none());
        assert!(parse_all_options("e1 2\u{212A}\u{017F}").is_empty());

        let corpus = "temperature 2\u{212A} in e1 2\u{212A}a today";
        assert!(parse_from_corpus(corpus).is_empty());
        let records =
            parse_from_corpus_with(corpus, &Context::default(), &Options::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parse_round_trips_through_normalised_form() {
        let p = parse(" Sw1A2aa ").unwrap();
        let again = parse(&p.postcode).unwrap();
        assert_eq!(again.postcode, p.postcode);
        assert_eq!(again.outcode, p.outcode);
        assert_eq!(again.incode, p.incode);
        assert_eq!(again.area, p.area);
        assert_eq!(again.district, p.district);
        assert_eq!(again.sub_district, p.sub_district);
        assert_eq!(again.sector, p.sector);
        assert_eq!(again.unit, p.unit);
        assert_eq!(again.fix_distance, 0);
    }

    #[test]
    fn parse_all_options_surfaces_every_reading() {
        let records = parse_all_options("OOO 4SS");
        let codes: Vec<&str> = records.iter().map(|p| p.postcode.as_str()).collect();
        assert_eq!(codes.len(), 3);
        for expected in ["O00 4SS", "OO0 4SS", "O0O 4SS"] {
            assert!(codes.contains(&expected), "missing {expected:?} in {codes:?}");
        }
    }

    #[test]
    fn parse_all_options_on_valid_input_is_single() {
        let records = parse_all_options("EC1R 1UB");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].postcode, "EC1R 1UB");
    }

    #[test]
    fn parse_all_options_sorts_by_fix_distance() {
        // SW1O needs one correction, SW10 needs two; least-corrected first.
        let records = parse_all_options("SW1O OAA");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].postcode, "SW1O 0AA");
        assert!(records[0].fix_distance < records[1].fix_distance);
    }

    #[test]
    fn strict_corpus_scan_in_document_order() {
        let corpus =
            "this is a check to see if we can get post codes liek thia ec1r   1ub , and that e3 4ss. But also eh16 50y and ei412";
        let records = parse_from_corpus(corpus);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].original, "ec1r   1ub");
        assert_eq!(records[0].postcode, "EC1R 1UB");
        assert_eq!(records[1].original, "e3 4ss");
        assert_eq!(records[1].postcode, "E3 4SS");
    }

    #[test]
    fn tolerant_corpus_scan_recovers_confused_postcodes() {
        let corpus =
            "this is a check to see if we can get post codes liek thia ec1r 1ub , and that e34ss. But also eh16 50y and ei412. followed by ehi6 50y";
        let records =
            parse_from_corpus_with(corpus, &Context::default(), &Options::default()).unwrap();
        let parsed: Vec<(&str, &str)> =
            records.iter().map(|p| (p.original.as_str(), p.postcode.as_str())).collect();
        assert_eq!(
            parsed,
            vec![
                ("ec1r 1ub", "EC1R 1UB"),
                ("e34ss", "E3 4SS"),
                ("eh16 50y", "EH16 5OY"),
                ("ehi6 50y", "EH16 5OY"),
            ]
        );
    }

    #[test]
    fn corpus_all_options_keeps_every_reading_with_directory() {
        let ctx = snapshot_context(&["SS0 7HG", "HA0 1AQ"]);
        let options = Options { attempt_fix: true, try_all_fix_options: true };
        let records = parse_from_corpus_with("sso 7hg HA0 1AQ", &ctx, &options).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].postcode, "SS0 7HG");
        assert_eq!(records[0].fix_distance, 1);
        assert!(records[0].in_directory);
        assert_eq!(records[1].postcode, "HA0 1AQ");
        assert_eq!(records[1].fix_distance, 0);
        assert!(records[1].in_directory);
    }

    #[test]
    fn corpus_single_result_mode_drops_unfixed_candidates() {
        // Both outward codes are length 3, where single-result coercion only
        // pins the leading slot: "SSO" and "HAO" come back unchanged and
        // fail validation.
        let records =
            parse_from_corpus_with("sso 7hg HAO 1AQ", &Context::default(), &Options::default())
                .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn all_options_without_fix_fails_fast() {
        let options = Options { attempt_fix: false, try_all_fix_options: true };
        assert_eq!(options.validate(), Err(OptionsError::AllOptionsWithoutFix));
        let result = parse_from_corpus_with("EC1R 1UB", &Context::default(), &options);
        assert_eq!(result, Err(OptionsError::AllOptionsWithoutFix));
    }

    #[test]
    fn directory_membership_is_a_pass_through() {
        let ctx = snapshot_context(&["HA0 1AQ"]);
        let p = parse_with("HA0 1AQ", &ctx, &Options::default()).unwrap();
        assert!(p.in_directory);

        // Swapping the snapshot changes only the membership flag.
        let q = parse("HA0 1AQ").unwrap();
        assert!(!q.in_directory);
        assert_eq!(p, q);
    }
}
