//! Blank line removal inside the import block
//!
//! The import block opens at the first line starting with `import` and
//! closes for good at the next line starting with `var`, `func`, `const` or
//! `type`. Lines that are exactly `"\n"` inside it are dropped; everything
//! else is copied byte for byte.
//!
//! Matching is a plain byte-prefix test, so a line such as `importer := 1`
//! also opens the block. The organizer downstream tolerates the stray blank
//! line removals this can cause.

use crate::parser::SourceLines;

/// Prefix opening the import block
const IMPORT_PREFIX: &[u8] = b"import";

/// Prefixes closing the import block
const DECL_PREFIXES: &[&[u8]] = &[b"var", b"func", b"const", b"type"];

/// Position of the scanner relative to the import block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// No `import` line seen yet
    BeforeImports,
    /// Inside the import block; blank lines are dropped
    InImports,
    /// The block was closed by a declaration and never reopens
    AfterImports,
}

impl BlockState {
    /// Advance the state for `line`
    #[must_use]
    pub fn next(self, line: &[u8]) -> Self {
        match self {
            BlockState::BeforeImports if line.starts_with(IMPORT_PREFIX) => BlockState::InImports,
            BlockState::InImports if DECL_PREFIXES.iter().any(|p| line.starts_with(p)) => {
                BlockState::AfterImports
            }
            state => state,
        }
    }
}

/// Remove the blank lines inside the import block of `source`.
///
/// A final line without a terminator is kept as-is.
#[must_use]
pub fn strip_import_blank_lines(source: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(source.len());
    let mut state = BlockState::BeforeImports;
    for line in SourceLines::new(source) {
        state = state.next(line);
        if state == BlockState::InImports && line == b"\n" {
            continue;
        }
        out.extend_from_slice(line);
    }
    out
}
