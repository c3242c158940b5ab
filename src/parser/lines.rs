//! `SourceLines` - Splits a byte buffer into physical lines
//!
//! Each yielded line keeps its `\n` terminator so that concatenating the
//! lines reproduces the input byte for byte. A final line without a
//! terminator is yielded as-is rather than dropped.

/// Iterator over the physical lines of a source buffer
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    rest: &'a [u8],
}

impl<'a> SourceLines<'a> {
    /// Create a new line iterator over `source`
    #[must_use]
    pub fn new(source: &'a [u8]) -> Self {
        Self { rest: source }
    }
}

impl<'a> Iterator for SourceLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.rest.len(), |idx| idx + 1);
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(line)
    }
}

/// Strip the line terminator (`\n` or `\r\n`) from a line
#[must_use]
pub fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whether a line holds nothing but whitespace
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_terminators() {
        let lines: Vec<&[u8]> = SourceLines::new(b"a\nb\n").collect();
        assert_eq!(lines, vec![&b"a\n"[..], &b"b\n"[..]]);
    }

    #[test]
    fn test_final_partial_line_is_yielded() {
        let lines: Vec<&[u8]> = SourceLines::new(b"a\nb").collect();
        assert_eq!(lines, vec![&b"a\n"[..], &b"b"[..]]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(SourceLines::new(b"").count(), 0);
    }

    #[test]
    fn test_blank_lines() {
        let lines: Vec<&[u8]> = SourceLines::new(b"\n\nx").collect();
        assert_eq!(lines, vec![&b"\n"[..], &b"\n"[..], &b"x"[..]]);
        assert_eq!(lines.concat(), b"\n\nx");
    }

    #[test]
    fn test_trim_newline() {
        assert_eq!(trim_newline("abc\n"), "abc");
        assert_eq!(trim_newline("abc\r\n"), "abc");
        assert_eq!(trim_newline("abc"), "abc");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank("\n"));
        assert!(is_blank(" \t\r\n"));
        assert!(!is_blank(" x\n"));
    }
}
