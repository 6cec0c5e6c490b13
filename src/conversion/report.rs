//! Run report types for tracking what a conversion run produced and skipped.
//!
//! Every containment decision made during a run (a dropped region, a failed
//! page, a skipped issue) is recorded here as well as logged, so the caller
//! can print a summary or hand it to another tool as JSON.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A report generated by one conversion run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunReport {
    /// Totals across all folders.
    pub counts: RunCounts,
    /// Output files written, in processing order.
    pub outputs: Vec<PathBuf>,
    /// Everything that was skipped, dropped or degraded.
    pub entries: Vec<RunEntry>,
}

impl RunReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the report.
    pub fn add(&mut self, entry: RunEntry) {
        self.entries.push(entry);
    }

    /// Count of warning-level entries.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == RunSeverity::Warning)
            .count()
    }

    /// Count of info-level entries.
    pub fn info_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == RunSeverity::Info)
            .count()
    }

    /// Returns true if anything was skipped or dropped.
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Entries with the given code.
    pub fn entries_with(&self, code: RunEntryCode) -> impl Iterator<Item = &RunEntry> {
        self.entries.iter().filter(move |e| e.code == code)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        writeln!(
            f,
            "  {} folder(s), {} issue(s) written, {} issue(s) skipped",
            c.folders, c.issues_written, c.issues_skipped
        )?;
        writeln!(
            f,
            "  {} page(s) converted, {} page(s) failed, {} page(s) without image dimensions",
            c.pages_converted, c.pages_failed, c.pages_unscaled
        )?;

        if c.regions_dropped > 0 || c.lines_dropped > 0 {
            writeln!(
                f,
                "  {} region(s) and {} line(s) dropped",
                c.regions_dropped, c.lines_dropped
            )?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for entry in self
                .entries
                .iter()
                .filter(|e| e.severity == RunSeverity::Warning)
            {
                writeln!(f, "  - {}", entry.message)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for entry in self
                .entries
                .iter()
                .filter(|e| e.severity == RunSeverity::Info)
            {
                writeln!(f, "  - {}", entry.message)?;
            }
        }

        Ok(())
    }
}

/// Totals for a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunCounts {
    pub folders: usize,
    pub issues_written: usize,
    pub issues_skipped: usize,
    pub pages_converted: usize,
    pub pages_failed: usize,
    /// Pages whose image dimensions could not be read (identity scale).
    pub pages_unscaled: usize,
    pub regions_dropped: usize,
    pub lines_dropped: usize,
}

/// A single recorded event.
#[derive(Clone, Debug, Serialize)]
pub struct RunEntry {
    pub severity: RunSeverity,
    pub code: RunEntryCode,
    pub message: String,
}

impl RunEntry {
    /// Create a warning-level entry (something was skipped or dropped).
    pub fn warning(code: RunEntryCode, message: impl Into<String>) -> Self {
        Self {
            severity: RunSeverity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Create an info-level entry (degraded but complete).
    pub fn info(code: RunEntryCode, message: impl Into<String>) -> Self {
        Self {
            severity: RunSeverity::Info,
            code,
            message: message.into(),
        }
    }
}

/// Severity level for run entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunSeverity {
    Warning,
    Info,
}

/// Stable entry codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunEntryCode {
    /// A folder could not be listed.
    FolderUnreadable,
    /// Issue id has no digit segment to derive a folder name from.
    IssueNaming,
    /// Issue has conflicting page numbers and the policy rejects it.
    IssueDuplicatePages,
    /// No page of the issue could be assembled.
    IssueNoPages,
    /// The output file could not be written.
    IssueWriteFailed,
    /// The run deadline passed before the issue started.
    IssueDeadline,
    /// A page failed to assemble and was left out of its issue.
    PageFailed,
    /// Image dimensions were unavailable; declared dimensions were used.
    PageUnscaled,
    /// Regions or lines were dropped from a page.
    AnnotationsDropped,
}
