//! The parsed-postcode record.

use log::warn;

use crate::directory::Directory;
use crate::grammar::sanitize;
use crate::parts;

/// A fully decomposed postcode plus parse metadata.
///
/// Structural fields are derived from the (possibly repaired) postcode;
/// `original` keeps the raw input untouched. Two extra fields describe the
/// parse itself rather than the postcode: [`in_directory`] and
/// [`fix_distance`]. Equality deliberately ignores both, so the same
/// postcode recovered from differently mangled inputs still compares equal.
///
/// `fix_distance` counts the aligned character positions at which the
/// sanitized original (reformatted as `OUTWARD INWARD`) differs from the
/// final postcode. It is a repair-effort signal for ranking candidates, not
/// a true edit distance: sorting ascending puts the most confident candidate
/// first.
///
/// [`in_directory`]: Postcode::in_directory
/// [`fix_distance`]: Postcode::fix_distance
#[derive(Debug, Clone)]
pub struct Postcode {
    /// The raw input fragment this record was parsed from.
    pub original: String,
    /// The normalised postcode, e.g. `"EC1R 1UB"`.
    pub postcode: String,
    /// Inward code: the trailing digit + two letters, e.g. `"1UB"`.
    pub incode: String,
    /// Outward code: area + district, e.g. `"EC1R"`.
    pub outcode: String,
    /// Area: the 1-2 leading letters, e.g. `"EC"`.
    pub area: String,
    /// District, e.g. `"EC1"`.
    pub district: String,
    /// Sub-district, e.g. `"EC1R"`; present only when the outward code ends
    /// in a single letter after the district digit.
    pub sub_district: Option<String>,
    /// Sector: outward code + sector digit, e.g. `"EC1R 1"`.
    pub sector: String,
    /// Unit: the final two letters, e.g. `"UB"`.
    pub unit: String,
    /// Whether the postcode is present in the configured [`Directory`].
    pub in_directory: bool,
    /// Number of characters the input was corrected by during parsing.
    pub fix_distance: u32,
}

impl Postcode {
    /// Decompose `candidate` (already validated or repaired) into a record,
    /// tagging it with metadata computed against `original`.
    ///
    /// Validity is re-checked here via the decomposition functions: any
    /// `None` from them aborts construction, so a record never exists with
    /// partially derived fields.
    pub(crate) fn build(original: &str, candidate: &str, directory: &dyn Directory) -> Option<Self> {
        if sanitize(candidate).starts_with("NPT") {
            warn!("found 'NPT' Newport postcode, discontinued in 1984");
        }

        let postcode = parts::to_normalised(candidate)?;
        let record = Postcode {
            original: original.to_string(),
            incode: parts::to_incode(candidate)?,
            outcode: parts::to_outcode(candidate)?,
            area: parts::to_area(candidate)?,
            district: parts::to_district(candidate)?,
            sub_district: parts::to_sub_district(candidate),
            sector: parts::to_sector(candidate)?,
            unit: parts::to_unit(candidate)?,
            in_directory: directory.contains(&postcode),
            fix_distance: aligned_distance(original, &postcode),
            postcode,
        };
        Some(record)
    }
}

impl PartialEq for Postcode {
    /// Identity over the structural fields; `in_directory` and
    /// `fix_distance` are metadata and do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original
            && self.postcode == other.postcode
            && self.incode == other.incode
            && self.outcode == other.outcode
            && self.area == other.area
            && self.district == other.district
            && self.sub_district == other.sub_district
            && self.sector == other.sector
            && self.unit == other.unit
    }
}

impl Eq for Postcode {}

/// Count aligned positions at which the sanitized original, reformatted as
/// `OUTWARD INWARD`, differs from the final postcode.
fn aligned_distance(original: &str, postcode: &str) -> u32 {
    let s = sanitize(original);
    let formatted = if s.len() > 3 {
        format!("{} {}", &s[..s.len() - 3], &s[s.len() - 3..])
    } else {
        s
    };
    formatted.chars().zip(postcode.chars()).filter(|(a, b)| a != b).count() as u32
}
