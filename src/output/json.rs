//! JSON output formatter for duplicate class reports.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "class": "com.example.Widget",
//!       "artifacts": ["g1:a1", "g1:a2"]
//!     }
//!   ],
//!   "summary": {
//!     "total_dependencies": 12,
//!     "artifacts_scanned": 9,
//!     "distinct_classes": 4210,
//!     "duplicate_classes": 1,
//!     "scan_duration_ms": 87,
//!     "exit_code": 2,
//!     "exit_code_name": "JD002"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use jardupe::duplicates::{DuplicateReport, ScanSummary};
//! use jardupe::error::ExitCode;
//! use jardupe::output::json::JsonOutput;
//!
//! let output = JsonOutput::new(&DuplicateReport::new(), &ScanSummary::default(), ExitCode::Success);
//! let json = output.to_json().unwrap();
//! assert!(json.starts_with("{"));
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateReport, ScanSummary};
use crate::error::ExitCode;

/// A single duplicated class in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateClass {
    /// Fully-qualified class name
    pub class: String,
    /// Owning artifacts as `group:artifact`, sorted, repeats kept
    pub artifacts: Vec<String>,
}

/// A skipped artifact in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkippedArtifact {
    /// The artifact as `group:artifact`
    pub artifact: String,
    /// Why it was skipped
    pub reason: String,
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Edges returned by the resolver
    pub total_dependencies: usize,
    /// Edges rejected by the scope or exclusion filter
    pub filtered_out: usize,
    /// Accepted edges that are not scannable jars
    pub not_scannable: usize,
    /// Edges dropped because an earlier edge had the same coordinate
    pub shadowed_coordinates: usize,
    /// Jars scanned
    pub artifacts_scanned: usize,
    /// Class entries found across all jars
    pub class_entries: usize,
    /// Distinct class paths
    pub distinct_classes: usize,
    /// Classes present in more than one artifact
    pub duplicate_classes: usize,
    /// Artifacts skipped because they could not be read
    pub skipped_artifacts: Vec<JsonSkippedArtifact>,
    /// Duration of the analysis in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "JD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_dependencies: summary.total_dependencies,
            filtered_out: summary.filtered_out,
            not_scannable: summary.not_scannable,
            shadowed_coordinates: summary.shadowed_coordinates,
            artifacts_scanned: summary.artifacts_scanned,
            class_entries: summary.class_entries,
            distinct_classes: summary.distinct_classes,
            duplicate_classes: summary.duplicate_classes,
            skipped_artifacts: summary
                .skipped_artifacts
                .iter()
                .map(|skipped| JsonSkippedArtifact {
                    artifact: skipped.artifact.to_string(),
                    reason: skipped.reason.clone(),
                })
                .collect(),
            scan_duration_ms: u64::try_from(summary.scan_duration.as_millis())
                .unwrap_or(u64::MAX),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Duplicated classes in class name order
    pub duplicates: Vec<JsonDuplicateClass>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from a report, summary and exit code.
    #[must_use]
    pub fn new(report: &DuplicateReport, summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: report
                .iter()
                .map(|(class, artifacts)| JsonDuplicateClass {
                    class: class.to_string(),
                    artifacts: artifacts.iter().map(ToString::to_string).collect(),
                })
                .collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
