//! Go source reading utilities.
//!
//! This module provides the line-level infrastructure the formatter works on:
//! - [`SourceLines`]: Splits a byte buffer into lines that keep their terminators
//! - [`imports`]: Locates and parses the import declarations at the top of a file
//! - [`patterns`]: Precompiled regex patterns for Go import syntax
//!
//! Nothing here builds a syntax tree. Only the import section is understood;
//! every other line is carried through as opaque text.

pub mod imports;
pub mod lines;
pub mod patterns;

pub use imports::{parse_import_section, ImportDecl, ImportSection, ImportSpec, SectionItem};
pub use lines::SourceLines;
