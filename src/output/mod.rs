//! Output formatters for duplicate class reports.
//!
//! This module provides different output formats for a finished analysis:
//! - Text warnings and a pass/fail verdict for build logs
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use jardupe::dependency::ManifestResolver;
//! use jardupe::duplicates::DuplicateFinder;
//! use jardupe::error::ExitCode;
//! use jardupe::output::json::JsonOutput;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let resolver = ManifestResolver::new("target/dependencies.json");
//! let (report, summary) = finder.find_duplicates(&resolver).unwrap();
//!
//! let output = JsonOutput::new(&report, &summary, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use csv::{CsvOutput, CsvOutputError};
pub use json::{JsonOutput, JsonOutputError};
pub use text::{
    format_class_line, format_report, DuplicatesDetected, TextOutput, Verdict, FAILURE_MESSAGE,
};
