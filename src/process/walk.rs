//! Directory tree walk
//!
//! Visits every entry under the root in file-name order, hands each eligible
//! Go file to [`process_file`] and stops at the first hard error. Files
//! already rewritten before the failing one stay rewritten.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::exclude::ExclusionSet;
use super::report::{Outcome, Reporter, SkipReason, WalkSummary};
use super::rewrite::{process_file, RewriteMode};
use crate::error::Error;
use crate::format::{ImportOrganizer, OrganizeOptions};

/// Suffix of Go source files
pub const GO_SUFFIX: &str = ".go";

/// Settings shared by every file of one walk
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub exclusions: ExclusionSet,
    pub organize: OrganizeOptions,
    pub mode: RewriteMode,
}

/// Whether a walk entry is a regular `.go` file.
///
/// Directories, symlinks, devices and sockets are never eligible.
fn is_go_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(GO_SUFFIX)
}

/// Resolve `root` to an absolute path without touching the filesystem
pub fn resolve_root(root: &Path) -> Result<PathBuf, Error> {
    std::path::absolute(root).map_err(|source| Error::PathResolution {
        path: root.to_path_buf(),
        source,
    })
}

/// Normalize every eligible Go file under `root`.
///
/// The tree is walked from the absolute root, but files are opened and
/// reported by their path under `root` as given.
///
/// Returns the counts of the run, or the first error encountered; in the
/// error case no summary is produced and the remaining files are not
/// visited.
pub fn walk_tree<O, R>(
    root: &Path,
    organizer: &O,
    options: &WalkOptions,
    reporter: &mut R,
) -> Result<WalkSummary, Error>
where
    O: ImportOrganizer + ?Sized,
    R: Reporter + ?Sized,
{
    let absolute = resolve_root(root)?;
    tracing::debug!(root = %absolute.display(), "walking");

    let mut summary = WalkSummary::default();
    for entry in WalkDir::new(&absolute).sort_by_file_name() {
        let entry = entry?;
        if !is_go_file(&entry) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(&absolute)
            .unwrap_or(entry.path());
        let path = if relative.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        };

        let outcome = if let Some(fragment) = options.exclusions.matching(relative) {
            Outcome::Skipped(SkipReason::Excluded(fragment.to_string()))
        } else {
            tracing::debug!(path = %path.display(), "processing");
            match process_file(&path, organizer, &options.organize, options.mode) {
                Ok(outcome) => outcome,
                Err(err) => {
                    reporter.report(&path, &Outcome::Failed(err.chain_message()));
                    return Err(err);
                }
            }
        };
        reporter.report(&path, &outcome);
        summary.record(&outcome);
    }
    Ok(summary)
}
