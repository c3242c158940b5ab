//! File processing pipeline.
//!
//! This module runs the formatter over a directory tree:
//!
//! **Per file** ([`process_file`]):
//! - Read the whole file through a read-write handle
//! - Strip blank lines inside the import block
//! - Organize the imports
//! - Rewrite in place only when the result differs from what was read
//!
//! **Per tree** ([`walk_tree`]):
//! - Visit entries in file-name order, keeping regular `.go` files
//! - Skip files whose relative path contains an exclusion fragment
//! - Stop at the first hard error
//!
//! Every file's [`Outcome`] goes to a [`Reporter`].

pub mod exclude;
pub mod report;
pub mod rewrite;
pub mod walk;

pub use exclude::{ExclusionSet, DEFAULT_EXCLUDE};
pub use report::{ConsoleReporter, Outcome, Reporter, SkipReason, WalkSummary};
pub use rewrite::{format_source, process_file, RewriteMode};
pub use walk::{resolve_root, walk_tree, WalkOptions, GO_SUFFIX};
