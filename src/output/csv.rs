//! CSV output formatter for duplicate class reports.
//!
//! One row is generated for each (class, artifact) occurrence, so a class
//! shipped twice by the same artifact produces two identical rows.
//!
//! # Columns
//!
//! - `class`: Fully-qualified class name
//! - `group_id`: Group id of the owning artifact
//! - `artifact_id`: Artifact id of the owning artifact
//!
//! # Example
//!
//! ```
//! use jardupe::duplicates::DuplicateReport;
//! use jardupe::output::csv::CsvOutput;
//!
//! let report = DuplicateReport::new();
//! let csv = CsvOutput::new(&report).to_string().unwrap();
//! assert_eq!(csv, "class,group_id,artifact_id\n");
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateReport;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    class: &'a str,
    group_id: &'a str,
    artifact_id: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a DuplicateReport,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a DuplicateReport) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// The header row is always written, even for an empty report.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(["class", "group_id", "artifact_id"])?;

        for (class, artifacts) in self.report.iter() {
            for artifact in artifacts {
                csv_writer.serialize(CsvRow {
                    class,
                    group_id: &artifact.group_id,
                    artifact_id: &artifact.artifact_id,
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
