//! Error types and result aliases for goimportfmt.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the binary and config glue
//! - [`Error`]: Hard failures of a formatting run (path resolution, I/O, organizer, walk)
//! - [`FormatError`]: Reasons the import organizer refuses a source text

use std::io;
use std::path::PathBuf;

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// A hard failure that aborts the whole run
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root could not be made absolute
    #[error("cannot resolve absolute path for {}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Open/read/truncate/seek/write failure on one file
    #[error("{}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The organizer could not process the file
    #[error("{}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    /// The directory iteration itself failed
    #[error("walking directory tree")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The message of this error followed by each of its sources
    #[must_use]
    pub fn chain_message(&self) -> String {
        std::iter::successors(Some(self as &dyn std::error::Error), |err| err.source())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }

    /// Path of the file the error is about, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::PathResolution { path, .. }
            | Error::Io { path, .. }
            | Error::Format { path, .. } => Some(path),
            Error::Walk(err) => err.path(),
        }
    }
}

/// Why the organizer rejected a source text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("source is not valid UTF-8 (at byte {0})")]
    InvalidUtf8(usize),

    #[error("expected 'package' clause before any other code")]
    MissingPackageClause,

    #[error("line {line}: import declaration is missing its closing ')'")]
    UnterminatedImport { line: usize },

    #[error("line {line}: invalid import spec: {text}")]
    InvalidImportSpec { line: usize, text: String },
}
