/// Regex patterns for Go import syntax
///
/// All patterns are compiled once on first use via `LazyLock`.
///
/// Patterns are matched against a single line with its terminator removed.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// constants covered by the tests below, so this only fires on a typo.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/// Go identifier (or the `.` / `_` import names)
const IDENT_STR: &str = r"[\p{L}_][\p{L}\p{N}_]*";
/// Interpreted or raw string literal holding an import path
const PATH_STR: &str = r#""(?:[^"\\]|\\.)*"|`[^`]*`"#;
/// Trailing line or single-line block comment
const COMMENT_STR: &str = r"//.*|/\*.*?\*/";

// ===== DECLARATION STARTS =====

/// `import` used as a keyword at column 0
pub static IMPORT_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r#"^import(?:[ \t(`"]|$)"#));

/// `import (` opening a grouped declaration, with whatever follows the paren
pub static IMPORT_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^import[ \t]*\((?P<rest>.*)$"));

/// `import <spec>` on a single line
pub static IMPORT_SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^import[ \t]+(?P<spec>[^ \t(].*)$"));

/// `package name` clause
pub static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"^package[ \t]+{IDENT_STR}")));

// ===== IMPORT SPECS =====

/// Start of one import spec: optional name followed by the quoted path
pub static SPEC_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(&format!(
        r"^(?:(?P<name>{IDENT_STR}|\.)[ \t]+)?(?P<path>{PATH_STR})"
    ))
});

/// A line holding only a comment
pub static COMMENT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"^[ \t]*(?:{COMMENT_STR})[ \t]*$")));

/// Top-level declaration keywords that end the import section
pub static TOP_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"^(?:func|var|const|type)(?:[ \t(]|$)"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_keyword_regex() {
        assert!(IMPORT_KEYWORD_RE.is_match("import \"fmt\""));
        assert!(IMPORT_KEYWORD_RE.is_match("import ("));
        assert!(IMPORT_KEYWORD_RE.is_match("import(\"fmt\")"));
        assert!(IMPORT_KEYWORD_RE.is_match("import\t\"os\""));
        assert!(!IMPORT_KEYWORD_RE.is_match("importer := 1"));
        assert!(!IMPORT_KEYWORD_RE.is_match(" import \"fmt\""));
    }

    #[test]
    fn test_import_group_regex() {
        let caps = IMPORT_GROUP_RE.captures("import (").unwrap();
        assert_eq!(&caps["rest"], "");
        let caps = IMPORT_GROUP_RE.captures("import ( // deps").unwrap();
        assert_eq!(caps["rest"].trim(), "// deps");
        assert!(!IMPORT_GROUP_RE.is_match("import \"fmt\""));
    }

    #[test]
    fn test_import_single_regex() {
        let caps = IMPORT_SINGLE_RE.captures("import \"fmt\"").unwrap();
        assert_eq!(&caps["spec"], "\"fmt\"");
        let caps = IMPORT_SINGLE_RE.captures("import f \"fmt\"").unwrap();
        assert_eq!(&caps["spec"], "f \"fmt\"");
        assert!(!IMPORT_SINGLE_RE.is_match("import ("));
    }

    #[test]
    fn test_package_regex() {
        assert!(PACKAGE_RE.is_match("package main"));
        assert!(PACKAGE_RE.is_match("package foo_test // tests"));
        assert!(!PACKAGE_RE.is_match("packages main"));
    }

    #[test]
    fn test_spec_prefix_regex() {
        let caps = SPEC_PREFIX_RE.captures("\"fmt\"").unwrap();
        assert_eq!(&caps["path"], "\"fmt\"");
        assert!(caps.name("name").is_none());

        let caps = SPEC_PREFIX_RE
            .captures("_ \"net/http/pprof\" // side effects")
            .unwrap();
        assert_eq!(&caps["name"], "_");
        assert_eq!(caps.get(0).unwrap().as_str(), "_ \"net/http/pprof\"");

        let caps = SPEC_PREFIX_RE.captures(". \"math\"").unwrap();
        assert_eq!(&caps["name"], ".");

        let caps = SPEC_PREFIX_RE.captures("`raw/path`").unwrap();
        assert_eq!(&caps["path"], "`raw/path`");

        assert!(!SPEC_PREFIX_RE.is_match("fmt"));
        assert!(!SPEC_PREFIX_RE.is_match("\"fmt"));
        assert!(!SPEC_PREFIX_RE.is_match("a b \"fmt\""));
    }

    #[test]
    fn test_comment_line_regex() {
        assert!(COMMENT_LINE_RE.is_match("\t// standard library"));
        assert!(COMMENT_LINE_RE.is_match("/* block */"));
        assert!(!COMMENT_LINE_RE.is_match("\"fmt\" // trailing"));
    }

    #[test]
    fn test_top_decl_regex() {
        assert!(TOP_DECL_RE.is_match("func main() {}"));
        assert!(TOP_DECL_RE.is_match("var ("));
        assert!(TOP_DECL_RE.is_match("type T struct{}"));
        assert!(TOP_DECL_RE.is_match("const x = 1"));
        assert!(!TOP_DECL_RE.is_match("functional := 1"));
        assert!(!TOP_DECL_RE.is_match("\tfunc()"));
    }
}
