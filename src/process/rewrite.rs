//! Per-file rewrite
//!
//! Reads a file whole, strips blank lines in its import block, runs the
//! organizer and writes the result back in place only if it differs from
//! what was read. A file that is already canonical is never written, so a
//! second run over the same tree touches nothing.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::report::Outcome;
use crate::error::Error;
use crate::format::{strip_import_blank_lines, ImportOrganizer, OrganizeOptions};

/// Whether changed files are written or only reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RewriteMode {
    /// Rewrite changed files in place
    #[default]
    Write,
    /// Report changed files without writing them
    List,
}

/// Run the strip and organize passes over `source`
pub fn format_source<O: ImportOrganizer + ?Sized>(
    path: &Path,
    source: &[u8],
    organizer: &O,
    options: &OrganizeOptions,
) -> Result<Vec<u8>, Error> {
    let stripped = strip_import_blank_lines(source);
    organizer
        .organize(path, &stripped, options)
        .map_err(|source| Error::Format {
            path: path.to_path_buf(),
            source,
        })
}

/// Truncate `file` and write `contents` from the start
fn rewrite_in_place(file: &mut File, contents: &[u8]) -> io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(contents)?;
    file.flush()
}

/// Normalize the imports of one file.
///
/// The file is opened read-write up front, so a missing or read-only file
/// fails before anything is read. The handle is closed on every return.
pub fn process_file<O: ImportOrganizer + ?Sized>(
    path: &Path,
    organizer: &O,
    options: &OrganizeOptions,
    mode: RewriteMode,
) -> Result<Outcome, Error> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let mut original = Vec::new();
    file.read_to_end(&mut original)
        .map_err(|e| Error::io(path, e))?;

    let organized = format_source(path, &original, organizer, options)?;
    if organized == original {
        return Ok(Outcome::Unchanged);
    }
    if mode == RewriteMode::List {
        return Ok(Outcome::WouldRewrite);
    }

    rewrite_in_place(&mut file, &organized).map_err(|e| Error::io(path, e))?;
    tracing::info!("format: {} success", path.display());
    Ok(Outcome::Rewritten)
}
