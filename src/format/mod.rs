//! Import formatting.
//!
//! This module contains the passes applied to every file:
//! - [`strip`]: Drops blank lines inside the import block, line by line
//! - [`organizer`]: The [`ImportOrganizer`] seam and the built-in [`GoImports`] organizer
//! - [`groups`]: Orders specs into import groups and renders declarations

pub mod groups;
pub mod organizer;
pub mod strip;

pub use groups::{import_group, render_decl, sort_specs};
pub use organizer::{GoImports, ImportOrganizer, OrganizeOptions};
pub use strip::{strip_import_blank_lines, BlockState};
