//! Text report and pass/fail decision.
//!
//! [`format_report`] renders one line per duplicated class, in class name
//! order, and decides whether the run passes:
//!
//! ```text
//! The class: com.example.Widget is present in the artifacts: g1:a1, g1:a2
//! ```
//!
//! The lines are emitted through the log sink at warn level by
//! [`Verdict::log_messages`]; a failing verdict turns into the
//! [`DuplicatesDetected`] error.
//!
//! # Example
//!
//! ```
//! use jardupe::dependency::ArtifactCoordinate;
//! use jardupe::duplicates::DuplicateReport;
//! use jardupe::output::text::format_report;
//!
//! let mut report = DuplicateReport::new();
//! report.insert(
//!     "com.example.Widget".into(),
//!     vec![ArtifactCoordinate::new("g1", "a2"), ArtifactCoordinate::new("g1", "a1")],
//! );
//!
//! let verdict = format_report(&report);
//! assert!(!verdict.success);
//! assert_eq!(
//!     verdict.messages[0],
//!     "The class: com.example.Widget is present in the artifacts: g1:a1, g1:a2"
//! );
//! ```

use std::io::{self, Write};

use yansi::Paint;

use crate::dependency::ArtifactCoordinate;
use crate::duplicates::{DuplicateReport, ScanSummary};

/// Message of the terminal failure raised when duplicates exist.
pub const FAILURE_MESSAGE: &str = "duplicate classes in dependencies detected";

/// Build-failing outcome: at least one class is owned by several artifacts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate classes in dependencies detected")]
pub struct DuplicatesDetected {
    /// Number of duplicated classes
    pub classes: usize,
}

/// Render the line for one duplicated class.
#[must_use]
pub fn format_class_line(class_name: &str, artifacts: &[ArtifactCoordinate]) -> String {
    let owners = artifacts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("The class: {class_name} is present in the artifacts: {owners}")
}

/// Rendered report lines plus the pass/fail decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// One line per duplicated class, in class name order
    pub messages: Vec<String>,
    /// Whether the run passes
    pub success: bool,
}

impl Verdict {
    /// Emit every line at warn level.
    pub fn log_messages(&self) {
        for message in &self.messages {
            log::warn!("{}", message);
        }
    }

    /// Turn the decision into a result.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicatesDetected`] when the verdict is a failure.
    pub fn into_result(self) -> Result<(), DuplicatesDetected> {
        if self.success {
            Ok(())
        } else {
            Err(DuplicatesDetected {
                classes: self.messages.len(),
            })
        }
    }
}

/// Render `report` and decide the outcome. An empty report passes with no
/// messages.
#[must_use]
pub fn format_report(report: &DuplicateReport) -> Verdict {
    let messages: Vec<String> = report
        .iter()
        .map(|(class_name, artifacts)| format_class_line(class_name, artifacts))
        .collect();

    Verdict {
        success: messages.is_empty(),
        messages,
    }
}

/// One-line human summary written after the per-class warnings.
pub struct TextOutput<'a> {
    report: &'a DuplicateReport,
    summary: &'a ScanSummary,
    color: bool,
}

impl<'a> TextOutput<'a> {
    /// Create a new text summary.
    #[must_use]
    pub fn new(report: &'a DuplicateReport, summary: &'a ScanSummary) -> Self {
        Self {
            report,
            summary,
            color: true,
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn summary_line(&self) -> String {
        if self.report.is_empty() {
            format!(
                "No duplicate classes in {} jars ({} classes checked)",
                self.summary.artifacts_scanned, self.summary.distinct_classes
            )
        } else {
            format!(
                "{} duplicate classes across {} artifacts",
                self.report.len(),
                self.report.involved_artifacts().len()
            )
        }
    }

    /// Write the summary line, and one line per skipped artifact.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let line = self.summary_line();
        match (self.color, self.report.is_empty()) {
            (false, _) => writeln!(writer, "{line}")?,
            (true, true) => writeln!(writer, "{}", line.green().bold())?,
            (true, false) => writeln!(writer, "{}", line.red().bold())?,
        }

        for skipped in &self.summary.skipped_artifacts {
            let note = format!("Skipped {}: {}", skipped.artifact, skipped.reason);
            if self.color {
                writeln!(writer, "{}", note.yellow())?;
            } else {
                writeln!(writer, "{note}")?;
            }
        }
        Ok(())
    }
}
