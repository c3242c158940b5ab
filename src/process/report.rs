//! Per-file outcomes and where they are reported

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Why a file was not processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The relative path contains this exclusion fragment
    Excluded(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Excluded(fragment) => write!(f, "excluded by '{fragment}'"),
        }
    }
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The organized text equals the file; nothing was written
    Unchanged,
    /// The file was rewritten in place
    Rewritten,
    /// The file would be rewritten, but the run only lists changes
    WouldRewrite,
    /// The file was not opened
    Skipped(SkipReason),
    /// Processing failed; the walk stops after this file
    Failed(String),
}

/// Counts of a completed walk
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    pub rewritten: usize,
    pub would_rewrite: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl WalkSummary {
    /// Count one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Rewritten => self.rewritten += 1,
            Outcome::WouldRewrite => self.would_rewrite += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => {}
        }
    }

    /// Number of files handed to the rewriter
    #[must_use]
    pub fn processed(&self) -> usize {
        self.rewritten + self.would_rewrite + self.unchanged
    }
}

/// Receives the outcome of every file the walk considers
pub trait Reporter {
    fn report(&mut self, path: &Path, outcome: &Outcome);
}

/// Collects outcomes in memory
impl Reporter for Vec<(PathBuf, Outcome)> {
    fn report(&mut self, path: &Path, outcome: &Outcome) {
        self.push((path.to_path_buf(), outcome.clone()));
    }
}

/// Prints excluded and would-be-rewritten paths, one per line
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// Reporter writing to standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, path: &Path, outcome: &Outcome) {
        match outcome {
            Outcome::Skipped(reason) => {
                tracing::debug!(path = %path.display(), %reason, "skipped");
                if let Err(err) = writeln!(self.out, "{}", path.display()) {
                    tracing::warn!(error = %err, "failed to report skipped file");
                }
            }
            Outcome::WouldRewrite => {
                if let Err(err) = writeln!(self.out, "{}", path.display()) {
                    tracing::warn!(error = %err, "failed to report file");
                }
            }
            Outcome::Unchanged => tracing::debug!(path = %path.display(), "unchanged"),
            Outcome::Rewritten => {}
            Outcome::Failed(message) => {
                tracing::debug!(path = %path.display(), error = %message, "failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = WalkSummary::default();
        summary.record(&Outcome::Rewritten);
        summary.record(&Outcome::Unchanged);
        summary.record(&Outcome::Unchanged);
        summary.record(&Outcome::Skipped(SkipReason::Excluded("vendor".into())));
        summary.record(&Outcome::Failed("boom".into()));
        assert_eq!(summary.rewritten, 1);
        assert_eq!(summary.unchanged, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.processed(), 3);
    }

    #[test]
    fn test_console_reporter_prints_skipped_and_listed() {
        let mut buf = Vec::new();
        let mut reporter = ConsoleReporter::new(&mut buf);
        reporter.report(
            Path::new("vendor/a.go"),
            &Outcome::Skipped(SkipReason::Excluded("vendor".into())),
        );
        reporter.report(Path::new("b.go"), &Outcome::Rewritten);
        reporter.report(Path::new("c.go"), &Outcome::Unchanged);
        reporter.report(Path::new("d.go"), &Outcome::WouldRewrite);
        drop(reporter);
        let printed = String::from_utf8(buf).unwrap();
        assert_eq!(printed, "vendor/a.go\nd.go\n");
    }

    #[test]
    fn test_vec_reporter_collects() {
        let mut outcomes: Vec<(PathBuf, Outcome)> = Vec::new();
        outcomes.report(Path::new("a.go"), &Outcome::Unchanged);
        assert_eq!(outcomes, vec![(PathBuf::from("a.go"), Outcome::Unchanged)]);
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Excluded("vendor".into());
        assert_eq!(reason.to_string(), "excluded by 'vendor'");
    }
}
