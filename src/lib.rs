//! goimportfmt - Batch normalizer for Go import blocks
//!
//! Walks a directory tree, removes blank lines inside each Go file's import
//! block, regroups and sorts the imports, and rewrites only the files whose
//! text actually changes.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{Error, FormatError, Result};
pub use format::{strip_import_blank_lines, GoImports, ImportOrganizer, OrganizeOptions};
pub use process::{
    process_file, walk_tree, ConsoleReporter, ExclusionSet, Outcome, Reporter, RewriteMode,
    WalkOptions, WalkSummary,
};

/// Install the stderr log subscriber.
///
/// `default_level` applies unless `RUST_LOG` is set. Calling this twice is
/// harmless; the second call leaves the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
