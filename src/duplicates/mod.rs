//! Duplicate class detection.
//!
//! This module provides functionality for:
//! - Accumulating class paths per contributing artifact
//! - Deriving the classes owned by more than one artifact
//! - Running the whole resolve, filter, scan and detect pipeline

pub mod aggregation;
pub mod finder;
pub mod groups;

pub use aggregation::ClassAggregation;
pub use finder::{
    default_io_threads, DuplicateFinder, FinderConfig, FinderError, ScanSummary, SkippedArtifact,
};
pub use groups::{detect_duplicates, DuplicateReport};
