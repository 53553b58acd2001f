//! Duplicate class detection and the resulting report.
//!
//! # Overview
//!
//! [`detect_duplicates`] turns a finished [`ClassAggregation`] into a
//! [`DuplicateReport`]: every class path contributed by two or more artifacts
//! is translated to its fully-qualified class name, and its contributors are
//! sorted by group id then artifact id. Paths with a single contributor are
//! dropped without being translated.
//!
//! # Example
//!
//! ```
//! use jardupe::dependency::ArtifactCoordinate;
//! use jardupe::duplicates::{detect_duplicates, ClassAggregation};
//! use jardupe::scanner::ClassEntryPath;
//!
//! let widget = ClassEntryPath::new("com/example/Widget.class").unwrap();
//! let mut aggregation = ClassAggregation::new();
//! aggregation.add_class(widget.clone(), ArtifactCoordinate::new("g1", "a2"));
//! aggregation.add_class(widget, ArtifactCoordinate::new("g1", "a1"));
//!
//! let report = detect_duplicates(&aggregation);
//! let artifacts = report.get("com.example.Widget").unwrap();
//! assert_eq!(artifacts[0].to_string(), "g1:a1");
//! assert_eq!(artifacts[1].to_string(), "g1:a2");
//! ```

use std::collections::BTreeMap;

use super::aggregation::ClassAggregation;
use crate::dependency::ArtifactCoordinate;

/// Classes owned by more than one artifact, keyed by fully-qualified name.
///
/// Iteration is in class name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    classes: BTreeMap<String, Vec<ArtifactCoordinate>>,
}

impl DuplicateReport {
    /// Create an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a class and its owners. Owners are sorted by coordinate,
    /// keeping repeated entries.
    pub fn insert(&mut self, class_name: String, mut artifacts: Vec<ArtifactCoordinate>) {
        artifacts.sort();
        self.classes.insert(class_name, artifacts);
    }

    /// Owners of `class_name`, if it is duplicated.
    #[must_use]
    pub fn get(&self, class_name: &str) -> Option<&[ArtifactCoordinate]> {
        self.classes.get(class_name).map(Vec::as_slice)
    }

    /// Number of duplicated classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over duplicated classes in class name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ArtifactCoordinate])> {
        self.classes
            .iter()
            .map(|(class, artifacts)| (class.as_str(), artifacts.as_slice()))
    }

    /// Distinct artifacts involved in at least one duplicate, sorted.
    #[must_use]
    pub fn involved_artifacts(&self) -> Vec<&ArtifactCoordinate> {
        let mut artifacts: Vec<&ArtifactCoordinate> =
            self.classes.values().flatten().collect();
        artifacts.sort();
        artifacts.dedup();
        artifacts
    }
}

/// Compute the classes contributed by more than one artifact.
#[must_use]
pub fn detect_duplicates(aggregation: &ClassAggregation) -> DuplicateReport {
    let mut report = DuplicateReport::new();

    for (path, artifacts) in aggregation.iter() {
        if artifacts.len() > 1 {
            report.insert(path.to_class_name(), artifacts.to_vec());
        }
    }

    log::debug!(
        "Detected {} duplicate classes among {} class paths",
        report.len(),
        aggregation.len()
    );
    report
}
