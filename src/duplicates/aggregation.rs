//! Class path to artifact accumulation.
//!
//! [`ClassAggregation`] is a multi-map from [`ClassEntryPath`] to every
//! artifact that contributed it. Values are appended in insertion order and
//! never de-duplicated, so an artifact that ships the same path twice shows
//! up twice.

use std::collections::HashMap;

use crate::dependency::ArtifactCoordinate;
use crate::scanner::ClassEntryPath;

/// Accumulated `path -> contributing artifacts` associations.
#[derive(Debug, Clone, Default)]
pub struct ClassAggregation {
    classes_to_artifacts: HashMap<ClassEntryPath, Vec<ArtifactCoordinate>>,
    contributions: usize,
}

impl ClassAggregation {
    /// Create an empty aggregation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `artifact` contains `path`.
    pub fn add_class(&mut self, path: ClassEntryPath, artifact: ArtifactCoordinate) {
        self.classes_to_artifacts
            .entry(path)
            .or_default()
            .push(artifact);
        self.contributions += 1;
    }

    /// Record every path of one artifact.
    pub fn add_classes<I>(&mut self, paths: I, artifact: &ArtifactCoordinate)
    where
        I: IntoIterator<Item = ClassEntryPath>,
    {
        for path in paths {
            self.add_class(path, artifact.clone());
        }
    }

    /// Contributors recorded for `path`, in insertion order.
    #[must_use]
    pub fn contributors(&self, path: &ClassEntryPath) -> &[ArtifactCoordinate] {
        self.classes_to_artifacts
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct class paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes_to_artifacts.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes_to_artifacts.is_empty()
    }

    /// Total number of recorded `(path, artifact)` pairs.
    #[must_use]
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// Iterate over paths and their contributors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClassEntryPath, &[ArtifactCoordinate])> {
        self.classes_to_artifacts
            .iter()
            .map(|(path, artifacts)| (path, artifacts.as_slice()))
    }
}
