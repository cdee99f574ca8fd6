//! Recognize and normalize UK postcodes embedded in free text, including
//! text with OCR/typing errors that confuse letters and digits (`0`/`O`,
//! `1`/`I`).
//!
//! The pipeline: a corpus scan yields raw candidates, the fixer repairs
//! near-misses by reinterpreting ambiguous characters against the postcode
//! grammar, and each surviving candidate is decomposed into a [`Postcode`]
//! record carrying its parts, a repair-effort count, and a
//! directory-membership flag.
//!
//! ```
//! use pillarbox::{fix, parse};
//!
//! assert_eq!(fix("SWIA 2AA"), "SW1A 2AA");
//!
//! let p = parse("ec1r 1ub").unwrap();
//! assert_eq!(p.outcode, "EC1R");
//! assert_eq!(p.sub_district.as_deref(), Some("EC1R"));
//! ```

#[macro_use]
mod macros;

mod api;
mod corpus;
mod directory;
mod fix;
mod grammar;
mod parts;
mod postcode;

pub use api::{
    Context, Options, OptionsError, parse, parse_all_options, parse_all_options_with,
    parse_from_corpus, parse_from_corpus_with, parse_with,
};
pub use directory::{Directory, EmptyDirectory, SetDirectory};
pub use fix::{fix, fix_with_options};
pub use grammar::{is_valid, is_valid_outcode};
pub use parts::{
    to_area, to_district, to_incode, to_normalised, to_outcode, to_sector, to_sub_district,
    to_unit,
};
pub use postcode::Postcode;
