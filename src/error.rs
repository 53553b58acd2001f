//! Structured error handling and exit codes.

use serde::Serialize;

use crate::output::DuplicatesDetected;

/// Exit codes for the jardupe application.
///
/// - 0: Success (no duplicate classes, analysis skipped, or nothing changed)
/// - 1: General error (resolution, archive, configuration or I/O failure)
/// - 2: Duplicate classes detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: no duplicate classes were found.
    Success = 0,
    /// General error: the analysis could not be completed.
    GeneralError = 1,
    /// Duplicates found: at least one class is shipped by several artifacts.
    DuplicatesFound = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "JD000",
            Self::GeneralError => "JD001",
            Self::DuplicatesFound => "JD002",
        }
    }

    /// Classify a top-level error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<DuplicatesDetected>().is_some() {
            Self::DuplicatesFound
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "JD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Underlying causes, outermost first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }
}
