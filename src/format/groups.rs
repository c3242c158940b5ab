//! Import grouping, ordering and rendering
//!
//! Specs are ordered by group, then path, then name, then comment. Groups:
//!
//! | group | imports                                          |
//! |-------|--------------------------------------------------|
//! | 0     | standard library (first path element has no `.`) |
//! | 1     | third party (first path element contains a `.`)  |
//! | 2     | paths starting with `appengine`                  |
//! | 3     | paths matching a configured local prefix         |
//!
//! Adjacent specs from different groups are separated by a blank line.

use super::organizer::OrganizeOptions;
use crate::parser::{ImportDecl, ImportSpec};

/// Group number of an import path
#[must_use]
pub fn import_group(local_prefix: Option<&str>, path: &str) -> u8 {
    if let Some(prefixes) = local_prefix {
        let is_local = prefixes
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .any(|p| path.starts_with(p) || p.trim_end_matches('/') == path);
        if is_local {
            return 3;
        }
    }
    if path.starts_with("appengine") {
        return 2;
    }
    let first = path.split('/').next().unwrap_or(path);
    u8::from(first.contains('.'))
}

/// Sort one run of specs and collapse duplicates of the same name and path
#[must_use]
pub fn sort_specs(specs: Vec<ImportSpec>, local_prefix: Option<&str>) -> Vec<ImportSpec> {
    let mut keyed: Vec<(u8, String, ImportSpec)> = specs
        .into_iter()
        .map(|spec| {
            let path = spec.import_path();
            (import_group(local_prefix, &path), path, spec)
        })
        .collect();
    keyed.sort_by(|(ga, pa, a), (gb, pb, b)| {
        ga.cmp(gb)
            .then_with(|| pa.cmp(pb))
            .then_with(|| {
                a.name
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.name.as_deref().unwrap_or(""))
            })
            .then_with(|| {
                a.comment
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.comment.as_deref().unwrap_or(""))
            })
    });

    let mut out: Vec<ImportSpec> = Vec::with_capacity(keyed.len());
    let mut last_path: Option<String> = None;
    for (_, path, spec) in keyed {
        if let Some(prev) = out.last_mut() {
            if last_path.as_deref() == Some(path.as_str()) && prev.name == spec.name {
                if prev.comment.is_none() {
                    prev.comment = spec.comment;
                }
                if prev.doc.is_empty() {
                    prev.doc = spec.doc;
                }
                continue;
            }
        }
        last_path = Some(path);
        out.push(spec);
    }
    out
}

/// One output line of a grouped declaration body
#[derive(Debug)]
enum BodyLine {
    Blank,
    Comment(String),
    Spec { text: String, comment: Option<String> },
}

/// Render a single import spec without its comment
fn spec_text(spec: &ImportSpec) -> String {
    match &spec.name {
        Some(name) => format!("{name} {}", spec.path),
        None => spec.path.clone(),
    }
}

/// Build the body lines of a grouped declaration
fn body_lines(
    runs: Vec<Vec<ImportSpec>>,
    trailing: Vec<String>,
    options: &OrganizeOptions,
) -> Vec<BodyLine> {
    let local_prefix = options.local_prefix.as_deref();
    let mut body = Vec::new();
    for run in runs {
        if !body.is_empty() {
            body.push(BodyLine::Blank);
        }
        let mut last_group = None;
        for spec in sort_specs(run, local_prefix) {
            let group = import_group(local_prefix, &spec.import_path());
            if last_group.is_some_and(|g| g != group) {
                body.push(BodyLine::Blank);
            }
            last_group = Some(group);

            if options.comments {
                body.extend(spec.doc.iter().cloned().map(BodyLine::Comment));
            }
            body.push(BodyLine::Spec {
                text: spec_text(&spec),
                comment: spec.comment.clone().filter(|_| options.comments),
            });
        }
    }
    if options.comments {
        body.extend(trailing.into_iter().map(BodyLine::Comment));
    }
    body
}

/// Display width of `text`, expanding tabs to `tab_width`
fn display_width(text: &str, tab_width: usize) -> usize {
    text.chars().fold(0, |width, c| {
        if c == '\t' {
            width + tab_width - (width % tab_width)
        } else {
            width + 1
        }
    })
}

/// Write body lines, aligning the comments of consecutive commented specs
fn write_body(out: &mut String, body: &[BodyLine], options: &OrganizeOptions) {
    let indent = options.indent();
    let tab_width = options.tab_width.max(1);
    let mut idx = 0;
    while idx < body.len() {
        match &body[idx] {
            BodyLine::Blank => {
                out.push('\n');
                idx += 1;
            }
            BodyLine::Comment(comment) => {
                out.push_str(&indent);
                out.push_str(comment);
                out.push('\n');
                idx += 1;
            }
            BodyLine::Spec { comment: None, text } => {
                out.push_str(&indent);
                out.push_str(text);
                out.push('\n');
                idx += 1;
            }
            BodyLine::Spec { comment: Some(_), .. } => {
                let block_end = body[idx..]
                    .iter()
                    .position(|line| !matches!(line, BodyLine::Spec { comment: Some(_), .. }))
                    .map_or(body.len(), |len| idx + len);
                let column = body[idx..block_end]
                    .iter()
                    .filter_map(|line| match line {
                        BodyLine::Spec { text, .. } => Some(display_width(text, tab_width)),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(0);
                for line in &body[idx..block_end] {
                    if let BodyLine::Spec {
                        text,
                        comment: Some(comment),
                    } = line
                    {
                        let pad = column - display_width(text, tab_width) + 1;
                        out.push_str(&indent);
                        out.push_str(text);
                        out.push_str(&" ".repeat(pad));
                        out.push_str(comment);
                        out.push('\n');
                    }
                }
                idx = block_end;
            }
        }
    }
}

/// Render an import declaration in canonical form
#[must_use]
pub fn render_decl(decl: ImportDecl, options: &OrganizeOptions) -> String {
    let with_comment = |mut line: String, comment: Option<String>| {
        if let Some(comment) = comment.filter(|_| options.comments) {
            line.push(' ');
            line.push_str(&comment);
        }
        line.push('\n');
        line
    };

    match decl {
        ImportDecl::Single(spec) => {
            with_comment(format!("import {}", spec_text(&spec)), spec.comment)
        }
        ImportDecl::Group {
            open_comment,
            runs,
            trailing,
            close_comment,
        } => {
            let body = body_lines(runs, trailing, options);
            if body.is_empty() {
                return with_comment("import ()".to_string(), close_comment.or(open_comment));
            }
            let mut out = with_comment("import (".to_string(), open_comment);
            write_body(&mut out, &body, options);
            out.push_str(&with_comment(")".to_string(), close_comment));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            name: name.map(str::to_string),
            path: format!("\"{path}\""),
            doc: Vec::new(),
            comment: None,
        }
    }

    fn group(specs: Vec<ImportSpec>) -> ImportDecl {
        ImportDecl::Group {
            open_comment: None,
            runs: vec![specs],
            trailing: Vec::new(),
            close_comment: None,
        }
    }

    #[test]
    fn test_import_group_numbers() {
        assert_eq!(import_group(None, "fmt"), 0);
        assert_eq!(import_group(None, "net/http"), 0);
        assert_eq!(import_group(None, "github.com/pkg/errors"), 1);
        assert_eq!(import_group(None, "appengine/datastore"), 2);
        assert_eq!(import_group(Some("github.com/acme"), "github.com/acme/x"), 3);
        assert_eq!(import_group(Some("example.com/a/, corp"), "example.com/a"), 3);
        assert_eq!(import_group(Some("example.com/a/, corp"), "corp/tool"), 3);
        assert_eq!(import_group(Some(""), "fmt"), 0);
    }

    #[test]
    fn test_sort_specs_by_group_then_path() {
        let sorted = sort_specs(
            vec![
                spec(None, "github.com/z/z"),
                spec(None, "os"),
                spec(None, "fmt"),
                spec(None, "github.com/a/a"),
            ],
            None,
        );
        let paths: Vec<String> = sorted.iter().map(ImportSpec::import_path).collect();
        assert_eq!(paths, vec!["fmt", "os", "github.com/a/a", "github.com/z/z"]);
    }

    #[test]
    fn test_sort_specs_collapses_duplicates() {
        let mut dup = spec(None, "fmt");
        dup.comment = Some("// printing".to_string());
        let sorted = sort_specs(vec![spec(None, "fmt"), dup, spec(Some("f"), "fmt")], None);
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].name, None);
        assert_eq!(sorted[0].comment.as_deref(), Some("// printing"));
        assert_eq!(sorted[1].name.as_deref(), Some("f"));
    }

    #[test]
    fn test_render_group_with_tabs_and_group_breaks() {
        let decl = group(vec![spec(None, "github.com/x/y"), spec(None, "fmt")]);
        let out = render_decl(decl, &OrganizeOptions::default());
        assert_eq!(out, "import (\n\t\"fmt\"\n\n\t\"github.com/x/y\"\n)\n");
    }

    #[test]
    fn test_render_group_with_spaces() {
        let options = OrganizeOptions {
            tab_indent: false,
            tab_width: 4,
            ..OrganizeOptions::default()
        };
        let out = render_decl(group(vec![spec(None, "fmt")]), &options);
        assert_eq!(out, "import (\n    \"fmt\"\n)\n");
    }

    #[test]
    fn test_render_aligns_trailing_comments() {
        let mut a = spec(None, "fmt");
        a.comment = Some("// print".to_string());
        let mut b = spec(Some("str"), "strings");
        b.comment = Some("// text".to_string());
        let out = render_decl(group(vec![a, b]), &OrganizeOptions::default());
        assert_eq!(
            out,
            "import (\n\t\"fmt\"         // print\n\tstr \"strings\" // text\n)\n"
        );
    }

    #[test]
    fn test_render_drops_comments_when_disabled() {
        let mut a = spec(None, "fmt");
        a.comment = Some("// print".to_string());
        a.doc = vec!["// doc".to_string()];
        let options = OrganizeOptions {
            comments: false,
            ..OrganizeOptions::default()
        };
        let out = render_decl(group(vec![a]), &options);
        assert_eq!(out, "import (\n\t\"fmt\"\n)\n");
    }

    #[test]
    fn test_render_single() {
        let mut s = spec(Some("f"), "fmt");
        s.comment = Some("// c".to_string());
        let out = render_decl(ImportDecl::Single(s), &OrganizeOptions::default());
        assert_eq!(out, "import f \"fmt\" // c\n");
    }

    #[test]
    fn test_render_empty_group() {
        let decl = ImportDecl::Group {
            open_comment: None,
            runs: Vec::new(),
            trailing: Vec::new(),
            close_comment: None,
        };
        assert_eq!(render_decl(decl, &OrganizeOptions::default()), "import ()\n");
    }

    #[test]
    fn test_display_width_expands_tabs() {
        assert_eq!(display_width("ab", 8), 2);
        assert_eq!(display_width("a\tb", 8), 9);
        assert_eq!(display_width("a\tb", 4), 5);
    }
}
