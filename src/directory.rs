//! Membership oracle over a snapshot of real, in-use postcodes.
//!
//! Structural validity and directory membership are deliberately separate:
//! a postcode can be perfectly well-formed yet not exist. The parser treats
//! the directory as an opaque boolean oracle, so swapping snapshots never
//! changes grammar or fix behavior.

use std::collections::HashSet;

use crate::parts::to_normalised;

/// A read-only set of known-in-use postcodes, keyed by normalised form.
pub trait Directory: Send + Sync {
    /// Whether `postcode` (in normalised `OUTWARD INWARD` form) is in the
    /// snapshot.
    fn contains(&self, postcode: &str) -> bool;
}

/// A directory with no entries; the default when no snapshot is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDirectory;

impl Directory for EmptyDirectory {
    fn contains(&self, _postcode: &str) -> bool {
        false
    }
}

/// A directory backed by an in-memory set of postcodes.
///
/// Entries are normalised on the way in; ones that fail the postcode grammar
/// are skipped.
#[derive(Debug, Clone, Default)]
pub struct SetDirectory {
    codes: HashSet<String>,
}

impl SetDirectory {
    /// Build a directory from an iterator of postcode strings.
    ///
    /// # Example
    /// ```
    /// use pillarbox::{Directory, SetDirectory};
    ///
    /// let directory = SetDirectory::new(["ha0 1aq", "SS0 7HG"]);
    /// assert!(directory.contains("HA0 1AQ"));
    /// assert!(!directory.contains("EC1R 1UB"));
    /// ```
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes.into_iter().filter_map(|code| to_normalised(code.as_ref())).collect();
        Self { codes }
    }

    /// Build a directory from newline-separated text, e.g. a snapshot file.
    /// Blank lines are ignored.
    pub fn from_lines(text: &str) -> Self {
        Self::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    /// Number of postcodes in the snapshot.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the snapshot holds no postcodes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Directory for SetDirectory {
    fn contains(&self, postcode: &str) -> bool {
        self.codes.contains(postcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_normalised_on_construction() {
        let directory = SetDirectory::new(["ha0   1aq"]);
        assert!(directory.contains("HA0 1AQ"));
        assert!(!directory.contains("ha0 1aq"));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let directory = SetDirectory::from_lines("HA0 1AQ\n\nnot a postcode\nSS0 7HG\n");
        assert_eq!(directory.len(), 2);
        assert!(directory.contains("SS0 7HG"));
    }

    #[test]
    fn empty_directory_contains_nothing() {
        assert!(!EmptyDirectory.contains("SW1A 2AA"));
    }
}
