//! Path exclusion by substring
//!
//! A file is excluded when its path relative to the scan root contains any
//! fragment as a plain substring. There is no glob or path-segment logic:
//! `vendor` excludes `vendor/x.go` and also `notvendorbutveneer/x.go`.

use std::collections::BTreeSet;
use std::path::{Path, MAIN_SEPARATOR};

/// Default fragments excluded from a run
pub const DEFAULT_EXCLUDE: &str = "vendor";

/// Set of path fragments that exclude a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    fragments: BTreeSet<String>,
}

impl ExclusionSet {
    /// Parse a comma-separated list; fragments are trimmed and empty ones dropped
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::from_lists([list])
    }

    /// Build a set from several comma-separated lists
    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments = lists
            .into_iter()
            .flat_map(|list| {
                list.as_ref()
                    .split(',')
                    .map(str::trim)
                    .filter(|fragment| !fragment.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { fragments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// First fragment contained in `relative`, if any.
    ///
    /// The path is matched with a leading separator, so `/vendor/` only
    /// excludes a directory named exactly `vendor`, including at the top.
    #[must_use]
    pub fn matching(&self, relative: &Path) -> Option<&str> {
        let relative = relative.to_string_lossy();
        let rooted = if relative.starts_with(MAIN_SEPARATOR) {
            relative.into_owned()
        } else {
            format!("{MAIN_SEPARATOR}{relative}")
        };
        self.iter().find(|fragment| rooted.contains(fragment))
    }
}
