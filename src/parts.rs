//! Decomposition of a valid postcode into its named parts.
//!
//! Every function here follows the same contract: if the input fails
//! [`is_valid`], the result is `None` and nothing partial is ever returned.
//! The part boundaries come straight from the grammar: the inward code is
//! always the trailing three characters of the sanitized postcode and the
//! outward code is everything before them.

use crate::grammar::{is_valid, sanitize};

/// Normalise a postcode into canonical `OUTWARD INWARD` form.
///
/// # Example
/// ```
/// use pillarbox::to_normalised;
///
/// assert_eq!(to_normalised(" ec1r   1ub "), Some("EC1R 1UB".to_string()));
/// assert_eq!(to_normalised("not a postcode"), None);
/// ```
pub fn to_normalised(postcode: &str) -> Option<String> {
    Some(format!("{} {}", to_outcode(postcode)?, to_incode(postcode)?))
}

/// Extract the outward code, e.g. `"EC1R"` from `"EC1R 1UB"`.
pub fn to_outcode(postcode: &str) -> Option<String> {
    if !is_valid(postcode) {
        return None;
    }
    let s = sanitize(postcode);
    Some(s[..s.len() - 3].to_string())
}

/// Extract the inward code, e.g. `"1UB"` from `"EC1R 1UB"`.
pub fn to_incode(postcode: &str) -> Option<String> {
    if !is_valid(postcode) {
        return None;
    }
    let s = sanitize(postcode);
    Some(s[s.len() - 3..].to_string())
}

/// Extract the area, the 1-2 leading letters of the outward code.
pub fn to_area(postcode: &str) -> Option<String> {
    let outcode = to_outcode(postcode)?;
    let area = regex!(r"(?i-u)^[a-z]{1,2}").find(&outcode)?;
    Some(area.as_str().to_string())
}

/// Extract the district, e.g. `"EC1"` from `"EC1R 1UB"`.
///
/// When the outward code carries no sub-district letter the district is the
/// outward code itself.
pub fn to_district(postcode: &str) -> Option<String> {
    let outcode = to_outcode(postcode)?;
    Some(district_split(&outcode).unwrap_or(outcode))
}

/// Extract the sub-district, e.g. `"EC1R"` from `"EC1R 1UB"`.
///
/// Only present when the outward code ends in a single letter after the
/// district digit; `None` otherwise (and for invalid input).
pub fn to_sub_district(postcode: &str) -> Option<String> {
    let outcode = to_outcode(postcode)?;
    district_split(&outcode).map(|_| outcode)
}

/// Extract the sector, e.g. `"EC1R 1"` from `"EC1R 1UB"`.
pub fn to_sector(postcode: &str) -> Option<String> {
    let outcode = to_outcode(postcode)?;
    let incode = to_incode(postcode)?;
    Some(format!("{} {}", outcode, &incode[..1]))
}

/// Extract the unit, the last two letters of the inward code.
pub fn to_unit(postcode: &str) -> Option<String> {
    let incode = to_incode(postcode)?;
    Some(incode[1..].to_string())
}

/// Split off a trailing sub-district letter, returning the district part.
fn district_split(outcode: &str) -> Option<String> {
    let caps = regex!(r"(?i-u)^([a-z]{1,2}\d)([a-z])$").captures(outcode)?;
    Some(caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_sub_districted_postcode() {
        let postcode = "ec1r 1ub";
        assert_eq!(to_normalised(postcode).as_deref(), Some("EC1R 1UB"));
        assert_eq!(to_outcode(postcode).as_deref(), Some("EC1R"));
        assert_eq!(to_incode(postcode).as_deref(), Some("1UB"));
        assert_eq!(to_area(postcode).as_deref(), Some("EC"));
        assert_eq!(to_district(postcode).as_deref(), Some("EC1"));
        assert_eq!(to_sub_district(postcode).as_deref(), Some("EC1R"));
        assert_eq!(to_sector(postcode).as_deref(), Some("EC1R 1"));
        assert_eq!(to_unit(postcode).as_deref(), Some("UB"));
    }

    #[test]
    fn decomposes_plain_district_postcode() {
        let postcode = "e3 4ss";
        assert_eq!(to_normalised(postcode).as_deref(), Some("E3 4SS"));
        assert_eq!(to_outcode(postcode).as_deref(), Some("E3"));
        assert_eq!(to_incode(postcode).as_deref(), Some("4SS"));
        assert_eq!(to_area(postcode).as_deref(), Some("E"));
        assert_eq!(to_district(postcode).as_deref(), Some("E3"));
        assert_eq!(to_sub_district(postcode), None);
        assert_eq!(to_sector(postcode).as_deref(), Some("E3 4"));
        assert_eq!(to_unit(postcode).as_deref(), Some("SS"));
    }

    #[test]
    fn numeric_second_outward_slot_is_not_a_sub_district() {
        // SW10: the trailing character is a digit, so the district is the
        // whole outward code.
        assert_eq!(to_district("SW10 9PA").as_deref(), Some("SW10"));
        assert_eq!(to_sub_district("SW10 9PA"), None);
    }

    #[test]
    fn invalid_input_yields_no_parts() {
        for case in ["", "EC1R", "1A 2AA", "ei412"] {
            assert_eq!(to_normalised(case), None, "{case:?}");
            assert_eq!(to_outcode(case), None, "{case:?}");
            assert_eq!(to_incode(case), None, "{case:?}");
            assert_eq!(to_area(case), None, "{case:?}");
            assert_eq!(to_district(case), None, "{case:?}");
            assert_eq!(to_sub_district(case), None, "{case:?}");
            assert_eq!(to_sector(case), None, "{case:?}");
            assert_eq!(to_unit(case), None, "{case:?}");
        }
    }

    #[test]
    fn grammar_soundness() {
        for case in ["EC1R 1UB", "e3 4ss", " SW1A 2AA ", "so16 0as", "N1 9GU"] {
            let rejoined = format!("{} {}", to_outcode(case).unwrap(), to_incode(case).unwrap());
            assert_eq!(Some(rejoined), to_normalised(case));
        }
    }
}
