//! Import section parsing
//!
//! Recognizes the import declarations at the top of a Go file without
//! parsing anything else. The section starts at the first `import` keyword
//! at column 0 and runs over import declarations, blank lines and comment
//! lines; it ends at the first line that is none of those.

use super::lines::{is_blank, trim_newline};
use super::patterns::{
    COMMENT_LINE_RE, IMPORT_GROUP_RE, IMPORT_KEYWORD_RE, IMPORT_SINGLE_RE, SPEC_PREFIX_RE,
    TOP_DECL_RE,
};
use crate::error::FormatError;

/// One import spec: `name "path" // comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name (`f`, `_`, `.`), if any
    pub name: Option<String>,
    /// Path literal exactly as written, quotes included
    pub path: String,
    /// Comment lines directly above the spec
    pub doc: Vec<String>,
    /// Comment after the spec on the same line
    pub comment: Option<String>,
}

impl ImportSpec {
    /// The import path with its quotes removed
    #[must_use]
    pub fn import_path(&self) -> String {
        unquote(&self.path)
    }

    /// Whether this is the cgo pseudo-package `"C"`
    #[must_use]
    pub fn is_cgo(&self) -> bool {
        self.import_path() == "C"
    }
}

/// Remove the delimiters of an interpreted or raw string literal
fn unquote(literal: &str) -> String {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
    {
        return raw.to_string();
    }
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// A single import declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecl {
    /// `import name "path" // comment`
    Single(ImportSpec),
    /// `import ( ... )`
    Group {
        /// Comment following the opening paren
        open_comment: Option<String>,
        /// Specs in blank-line separated runs
        runs: Vec<Vec<ImportSpec>>,
        /// Comment lines after the last spec
        trailing: Vec<String>,
        /// Comment following the closing paren
        close_comment: Option<String>,
    },
}

impl ImportDecl {
    /// Whether this declaration imports only the cgo pseudo-package
    #[must_use]
    pub fn is_cgo(&self) -> bool {
        match self {
            ImportDecl::Single(spec) => spec.is_cgo(),
            ImportDecl::Group { runs, .. } => {
                let mut specs = runs.iter().flatten().peekable();
                specs.peek().is_some() && specs.all(ImportSpec::is_cgo)
            }
        }
    }
}

/// One element of the import section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionItem {
    /// An import declaration and the raw lines it was parsed from
    Decl { decl: ImportDecl, raw: Vec<String> },
    /// A top-level comment line, kept verbatim
    Comment(String),
    /// A blank line
    Blank,
}

/// The import section of a file, located by line indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSection {
    /// Index of the line holding the first `import` keyword
    pub start: usize,
    /// Index one past the last line of the last declaration
    pub end: usize,
    /// Items in source order; always starts and ends with a `Decl`
    pub items: Vec<SectionItem>,
}

/// What was found on one line of a grouped declaration
#[derive(Debug, Default)]
struct LineTokens {
    specs: Vec<ImportSpec>,
    /// Comment seen before any spec on the line
    leading_comment: Option<String>,
    /// Set once the closing paren was seen, with its trailing comment
    close: Option<Option<String>>,
}

/// Scan the specs, comments and closing paren on one line.
///
/// A trailing comment attaches to the last spec of the line; after `)` it
/// belongs to the closing paren.
fn scan_line(content: &str, line: usize, in_group: bool) -> Result<LineTokens, FormatError> {
    let invalid = || FormatError::InvalidImportSpec {
        line,
        text: content.trim().to_string(),
    };

    let mut tokens = LineTokens::default();
    let mut rest = content.trim_start();
    loop {
        rest = rest.trim_start_matches([' ', '\t', ';']);
        if rest.is_empty() {
            break;
        }

        if rest.starts_with("//") || rest.starts_with("/*") {
            let comment = if rest.starts_with("//") {
                rest.trim_end().to_string()
            } else {
                let end = rest[2..].find("*/").ok_or_else(invalid)? + 4;
                let comment = rest[..end].to_string();
                if !rest[end..].trim().is_empty() {
                    return Err(invalid());
                }
                comment
            };
            if let Some(close) = tokens.close.as_mut() {
                *close = Some(comment);
            } else if let Some(last) = tokens.specs.last_mut() {
                last.comment = Some(comment);
            } else {
                tokens.leading_comment = Some(comment);
            }
            break;
        }

        if tokens.close.is_some() {
            return Err(invalid());
        }

        if in_group && rest.starts_with(')') {
            tokens.close = Some(None);
            rest = &rest[1..];
            continue;
        }

        let caps = SPEC_PREFIX_RE.captures(rest).ok_or_else(invalid)?;
        let matched = caps.get(0).map_or(0, |m| m.end());
        tokens.specs.push(ImportSpec {
            name: caps.name("name").map(|m| m.as_str().to_string()),
            path: caps["path"].to_string(),
            doc: Vec::new(),
            comment: None,
        });
        rest = &rest[matched..];
        if !(rest.is_empty() || rest.starts_with([' ', '\t', ';', ')', '/'])) {
            return Err(invalid());
        }
    }
    Ok(tokens)
}

/// Whether a raw line separates runs of specs.
///
/// Only an empty line counts. Lines holding just spaces, tabs or a `\r`
/// are dropped without splitting the run.
fn is_run_break(raw: &str) -> bool {
    raw == "\n"
}

/// Collect a block comment spanning `lines[idx..]` into `doc`.
///
/// Returns the index of the line holding the closing `*/`.
fn collect_block_comment(
    lines: &[&str],
    mut idx: usize,
    start: usize,
    doc: &mut Vec<String>,
) -> Result<usize, FormatError> {
    loop {
        let Some(raw) = lines.get(idx) else {
            return Err(FormatError::UnterminatedImport { line: start + 1 });
        };
        let text = trim_newline(raw).trim();
        if let Some(close) = text.find("*/") {
            if !text[close + 2..].trim().is_empty() {
                return Err(FormatError::InvalidImportSpec {
                    line: idx + 1,
                    text: text.to_string(),
                });
            }
            doc.push(text.to_string());
            return Ok(idx);
        }
        doc.push(text.to_string());
        idx += 1;
    }
}

/// Parse a grouped declaration whose `import (` sits at `lines[start]`.
///
/// Returns the declaration and the index one past its closing line.
fn parse_group(
    lines: &[&str],
    start: usize,
    after_paren: &str,
) -> Result<(ImportDecl, usize), FormatError> {
    let mut open_comment = None;
    let mut runs: Vec<Vec<ImportSpec>> = vec![Vec::new()];
    let mut pending_doc: Vec<String> = Vec::new();
    let mut close_comment = None;

    let mut idx = start;
    let mut content = after_paren.to_string();
    loop {
        let is_first = idx == start;
        let trimmed = content.trim();

        if !is_first && trimmed.starts_with("/*") && !trimmed.contains("*/") {
            idx = collect_block_comment(lines, idx, start, &mut pending_doc)?;
        } else {
            let tokens = scan_line(&content, idx + 1, true)?;

            if is_blank(&content) {
                if !is_first
                    && is_run_break(lines[idx])
                    && runs.last().is_some_and(|run| !run.is_empty())
                {
                    runs.push(Vec::new());
                }
            } else if let Some(comment) = tokens.leading_comment {
                if is_first {
                    open_comment = Some(comment);
                } else {
                    pending_doc.push(comment);
                }
            }

            let mut specs = tokens.specs;
            if let Some(first) = specs.first_mut() {
                first.doc = std::mem::take(&mut pending_doc);
            }
            if let Some(run) = runs.last_mut() {
                run.extend(specs);
            }

            if let Some(comment) = tokens.close {
                close_comment = comment;
                break;
            }
        }

        idx += 1;
        let Some(next) = lines.get(idx) else {
            return Err(FormatError::UnterminatedImport { line: start + 1 });
        };
        content = trim_newline(next).to_string();
    }

    runs.retain(|run| !run.is_empty());
    Ok((
        ImportDecl::Group {
            open_comment,
            runs,
            trailing: pending_doc,
            close_comment,
        },
        idx + 1,
    ))
}

/// Parse a single-line declaration
fn parse_single(spec_text: &str, line: usize) -> Result<ImportDecl, FormatError> {
    let tokens = scan_line(spec_text, line, false)?;
    let mut specs = tokens.specs.into_iter();
    match (specs.next(), specs.next()) {
        (Some(spec), None) => Ok(ImportDecl::Single(spec)),
        _ => Err(FormatError::InvalidImportSpec {
            line,
            text: spec_text.trim().to_string(),
        }),
    }
}

/// Parse the declaration starting at `lines[idx]`
fn parse_decl(lines: &[&str], idx: usize) -> Result<(ImportDecl, usize), FormatError> {
    let text = trim_newline(lines[idx]);
    if let Some(caps) = IMPORT_GROUP_RE.captures(text) {
        let rest = caps.name("rest").map_or("", |m| m.as_str());
        return parse_group(lines, idx, rest);
    }
    if let Some(caps) = IMPORT_SINGLE_RE.captures(text) {
        return Ok((parse_single(&caps["spec"], idx + 1)?, idx + 1));
    }
    Err(FormatError::InvalidImportSpec {
        line: idx + 1,
        text: text.trim().to_string(),
    })
}

/// Locate and parse the import section of a file.
///
/// `lines` are the physical lines of the file, terminators included.
/// Returns `Ok(None)` when the file has no import declaration before its
/// first top-level declaration.
pub fn parse_import_section(lines: &[&str]) -> Result<Option<ImportSection>, FormatError> {
    let Some(start) = lines
        .iter()
        .map(|line| trim_newline(line))
        .take_while(|line| !TOP_DECL_RE.is_match(line))
        .position(|line| IMPORT_KEYWORD_RE.is_match(line))
    else {
        return Ok(None);
    };

    let mut items = Vec::new();
    let mut end = start;
    let mut idx = start;
    while idx < lines.len() {
        let text = trim_newline(lines[idx]);
        if is_blank(text) {
            if is_run_break(lines[idx]) {
                items.push(SectionItem::Blank);
            }
            idx += 1;
        } else if COMMENT_LINE_RE.is_match(text) {
            items.push(SectionItem::Comment(lines[idx].to_string()));
            idx += 1;
        } else if IMPORT_KEYWORD_RE.is_match(text) {
            let (decl, next) = parse_decl(lines, idx)?;
            let raw = lines[idx..next].iter().map(|l| (*l).to_string()).collect();
            items.push(SectionItem::Decl { decl, raw });
            idx = next;
            end = next;
        } else {
            break;
        }
    }

    while !matches!(items.last(), Some(SectionItem::Decl { .. })) {
        items.pop();
    }

    Ok(Some(ImportSection { start, end, items }))
}
