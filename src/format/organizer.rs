//! Import organizer
//!
//! [`ImportOrganizer`] is the seam between the file rewriter and whatever
//! canonicalizes a file's imports. [`GoImports`] is the built-in
//! implementation: it sorts, deduplicates, merges and regroups the import
//! declarations of a Go file and fixes the blank lines around them, leaving
//! every other line untouched.

use std::path::Path;

use super::groups::render_decl;
use crate::error::FormatError;
use crate::parser::lines::{is_blank, trim_newline};
use crate::parser::patterns::{COMMENT_LINE_RE, PACKAGE_RE};
use crate::parser::{parse_import_section, ImportDecl, SectionItem};

/// Fixed style settings handed to every organizer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeOptions {
    /// Width of a tab stop, used for comment alignment and space indentation
    pub tab_width: usize,
    /// Indent specs with a tab rather than `tab_width` spaces
    pub tab_indent: bool,
    /// Keep comments inside the organized declarations
    pub comments: bool,
    /// Accept input that lacks a `package` clause
    pub fragment: bool,
    /// Comma-separated import path prefixes grouped after third-party imports
    pub local_prefix: Option<String>,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            tab_width: 8,
            tab_indent: true,
            comments: true,
            fragment: true,
            local_prefix: None,
        }
    }
}

impl OrganizeOptions {
    /// Indentation of one spec line
    #[must_use]
    pub fn indent(&self) -> String {
        if self.tab_indent {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width)
        }
    }
}

/// Canonicalizes the imports of one source text
pub trait ImportOrganizer {
    /// Return `source` with its imports in canonical form.
    ///
    /// `filename` identifies the file for diagnostics only.
    fn organize(
        &self,
        filename: &Path,
        source: &[u8],
        options: &OrganizeOptions,
    ) -> Result<Vec<u8>, FormatError>;
}

/// Built-in organizer for Go import declarations
#[derive(Debug, Default, Clone, Copy)]
pub struct GoImports;

impl ImportOrganizer for GoImports {
    fn organize(
        &self,
        filename: &Path,
        source: &[u8],
        options: &OrganizeOptions,
    ) -> Result<Vec<u8>, FormatError> {
        let text =
            std::str::from_utf8(source).map_err(|e| FormatError::InvalidUtf8(e.valid_up_to()))?;
        let lines: Vec<&str> = text.split_inclusive('\n').collect();

        if !options.fragment && !has_package_clause(&lines) {
            return Err(FormatError::MissingPackageClause);
        }

        let Some(section) = parse_import_section(&lines)? else {
            tracing::trace!(file = %filename.display(), "no import declarations");
            return Ok(source.to_vec());
        };
        tracing::trace!(
            file = %filename.display(),
            start = section.start + 1,
            end = section.end,
            "organizing import section"
        );

        let mut out = String::with_capacity(text.len());
        write_prefix(&mut out, &lines[..section.start]);
        write_section(&mut out, section.items, options);
        write_suffix(&mut out, &lines[section.end..]);
        Ok(out.into_bytes())
    }
}

/// Whether the first line of code is a `package` clause
fn has_package_clause(lines: &[&str]) -> bool {
    let mut in_block_comment = false;
    for line in lines {
        let text = trim_newline(line).trim();
        if in_block_comment {
            in_block_comment = !text.contains("*/");
            continue;
        }
        if text.is_empty() || COMMENT_LINE_RE.is_match(text) {
            continue;
        }
        if text.starts_with("/*") {
            in_block_comment = true;
            continue;
        }
        return PACKAGE_RE.is_match(text);
    }
    false
}

/// Write the lines before the first import declaration.
///
/// Blank lines right before the section collapse to one; a `package`
/// clause directly above the imports gets one blank line after it.
fn write_prefix(out: &mut String, prefix: &[&str]) {
    let Some(last) = prefix.iter().rposition(|line| !is_blank(line)) else {
        prefix.iter().for_each(|line| out.push_str(line));
        return;
    };
    prefix[..=last].iter().for_each(|line| out.push_str(line));
    if !prefix[last].ends_with('\n') {
        out.push('\n');
    }
    let blanks = prefix.len() - last - 1;
    if blanks > 0 || PACKAGE_RE.is_match(trim_newline(prefix[last])) {
        out.push('\n');
    }
}

/// Write the lines after the last import declaration.
///
/// Exactly one blank line separates the imports from following code.
fn write_suffix(out: &mut String, suffix: &[&str]) {
    let Some(first) = suffix.iter().position(|line| !is_blank(line)) else {
        return;
    };
    out.push('\n');
    suffix[first..].iter().for_each(|line| out.push_str(line));
}

/// Output element of the import section
enum Chunk {
    Decl(ImportDecl),
    Raw(String),
    Blank,
}

/// Whether a declaration carries no comments outside its specs
fn is_mergeable(decl: &ImportDecl) -> bool {
    match decl {
        ImportDecl::Single(_) => true,
        ImportDecl::Group {
            open_comment,
            trailing,
            close_comment,
            ..
        } => open_comment.is_none() && trailing.is_empty() && close_comment.is_none(),
    }
}

/// Move the specs of `from` to the end of `into`
fn merge_into(into: ImportDecl, from: ImportDecl) -> ImportDecl {
    let (open_comment, mut runs, trailing, close_comment) = match into {
        ImportDecl::Single(spec) => (None, vec![vec![spec]], Vec::new(), None),
        ImportDecl::Group {
            open_comment,
            runs,
            trailing,
            close_comment,
        } => (open_comment, runs, trailing, close_comment),
    };
    let moved: Vec<_> = match from {
        ImportDecl::Single(spec) => vec![spec],
        ImportDecl::Group { runs, .. } => runs.into_iter().flatten().collect(),
    };
    match runs.last_mut() {
        Some(run) => run.extend(moved),
        None => runs.push(moved),
    }
    ImportDecl::Group {
        open_comment,
        runs,
        trailing,
        close_comment,
    }
}

/// Merge, organize and write the import section
fn write_section(out: &mut String, items: Vec<SectionItem>, options: &OrganizeOptions) {
    let mut chunks: Vec<Chunk> = Vec::new();
    for item in items {
        match item {
            SectionItem::Decl { decl, raw } if decl.is_cgo() => {
                chunks.push(Chunk::Raw(raw.concat()));
            }
            SectionItem::Decl { decl, .. } => {
                let target = chunks
                    .iter()
                    .rposition(|chunk| !matches!(chunk, Chunk::Blank))
                    .filter(|&idx| {
                        matches!(&chunks[idx], Chunk::Decl(prev) if is_mergeable(prev))
                            && is_mergeable(&decl)
                    });
                match target {
                    Some(idx) => {
                        chunks.truncate(idx + 1);
                        if let Some(Chunk::Decl(prev)) = chunks.pop() {
                            chunks.push(Chunk::Decl(merge_into(prev, decl)));
                        }
                    }
                    None => chunks.push(Chunk::Decl(decl)),
                }
            }
            SectionItem::Comment(line) => chunks.push(Chunk::Raw(line)),
            SectionItem::Blank => {
                if !matches!(chunks.last(), Some(Chunk::Blank)) {
                    chunks.push(Chunk::Blank);
                }
            }
        }
    }

    for chunk in chunks {
        match chunk {
            Chunk::Decl(decl) => out.push_str(&render_decl(decl, options)),
            Chunk::Raw(text) => {
                out.push_str(&text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
            Chunk::Blank => out.push('\n'),
        }
    }
}
