//! Duplicate finder orchestrating the detection pipeline.
//!
//! # Overview
//!
//! This module runs the full pipeline for one analysis:
//! 1. **Resolve** - obtain the dependency edges from a [`DependencyResolver`]
//! 2. **Select** - keep edges accepted by the [`DependencyFilter`] whose
//!    artifact is a jar, one per `group:artifact` coordinate
//! 3. **Scan** - list class entries of every selected jar on a bounded
//!    rayon pool
//! 4. **Aggregate** - feed the entries into a [`ClassAggregation`] in
//!    coordinate order
//! 5. **Detect** - derive the [`DuplicateReport`]
//!
//! A jar that cannot be read aborts the run unless strict mode is off.
//!
//! # Example
//!
//! ```no_run
//! use jardupe::dependency::ManifestResolver;
//! use jardupe::duplicates::{DuplicateFinder, FinderConfig};
//!
//! let config = FinderConfig::default().with_excludes(vec!["javax.servlet:*".into()]);
//! let finder = DuplicateFinder::new(config).unwrap();
//!
//! let resolver = ManifestResolver::new("target/dependencies.json");
//! let (report, summary) = finder.find_duplicates(&resolver).unwrap();
//! println!("{} duplicate classes in {} jars", report.len(), summary.artifacts_scanned);
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::aggregation::ClassAggregation;
use super::groups::{detect_duplicates, DuplicateReport};
use crate::dependency::{ArtifactCoordinate, DependencyEdge, DependencyResolver, ResolutionError};
use crate::filter::{DependencyFilter, FilterError};
use crate::progress::ProgressCallback;
use crate::scanner::{ArchiveScanner, ClassEntryPath, ScanError};

/// Name of the scanning phase reported to progress callbacks.
const SCAN_PHASE: &str = "scan";

/// Default number of scanning threads: the available parallelism.
#[must_use]
pub fn default_io_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Exclusion patterns `groupId:artifactId[:extension[:classifier]]`.
    pub excludes: Vec<String>,
    /// Number of threads used to scan archives.
    pub io_threads: usize,
    /// Abort on the first unreadable archive (default). When false the
    /// artifact is skipped with a warning.
    pub strict: bool,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("excludes", &self.excludes)
            .field("io_threads", &self.io_threads)
            .field("strict", &self.strict)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            excludes: Vec::new(),
            io_threads: default_io_threads(),
            strict: true,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the exclusion patterns.
    #[must_use]
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Set the scanning thread count (at least one).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set fail-fast on unreadable archives.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// An artifact left out of the analysis because its archive could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    /// The artifact
    pub artifact: ArtifactCoordinate,
    /// Why it was skipped
    pub reason: String,
}

/// Summary statistics from one analysis run.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Edges returned by the resolver
    pub total_dependencies: usize,
    /// Edges rejected by the scope or exclusion filter
    pub filtered_out: usize,
    /// Accepted edges whose artifact is not a jar, or a root without a file
    pub not_scannable: usize,
    /// Accepted jar edges sharing a coordinate with an earlier edge
    pub shadowed_coordinates: usize,
    /// Jars successfully scanned
    pub artifacts_scanned: usize,
    /// Total class entries found across scanned jars
    pub class_entries: usize,
    /// Distinct class paths
    pub distinct_classes: usize,
    /// Classes present in more than one artifact
    pub duplicate_classes: usize,
    /// Artifacts skipped in non-strict mode
    pub skipped_artifacts: Vec<SkippedArtifact>,
    /// Duration of the whole analysis
    pub scan_duration: Duration,
}

/// Errors that abort an analysis run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The dependency graph could not be resolved.
    #[error("could not resolve dependencies: {0}")]
    Resolution(#[from] ResolutionError),

    /// An exclusion pattern is malformed.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// An eligible artifact could not be read.
    #[error("could not open jar of: {artifact}: {source}")]
    Archive {
        /// The artifact (`group:artifact:extension[:classifier]:version`)
        artifact: String,
        /// The underlying scan error
        #[source]
        source: ScanError,
    },
}

/// Duplicate finder that orchestrates the detection pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    filter: DependencyFilter,
    scanner: ArchiveScanner,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Filter`] if an exclusion pattern is malformed.
    pub fn new(config: FinderConfig) -> Result<Self, FinderError> {
        let filter = DependencyFilter::for_excludes(&config.excludes)?;
        Ok(Self {
            config,
            filter,
            scanner: ArchiveScanner::new(),
        })
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: FinderConfig::default(),
            filter: DependencyFilter::default(),
            scanner: ArchiveScanner::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Resolve dependencies and find duplicate classes among them.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if resolution fails or, in strict mode, if an
    /// eligible jar cannot be read. No partial report is produced.
    pub fn find_duplicates<R>(
        &self,
        resolver: &R,
    ) -> Result<(DuplicateReport, ScanSummary), FinderError>
    where
        R: DependencyResolver + ?Sized,
    {
        let edges = resolver.resolve()?;
        self.find_duplicates_in(&edges)
    }

    /// Find duplicate classes among already resolved edges.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Archive`] in strict mode if an eligible jar
    /// cannot be read.
    pub fn find_duplicates_in(
        &self,
        edges: &[DependencyEdge],
    ) -> Result<(DuplicateReport, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary {
            total_dependencies: edges.len(),
            ..Default::default()
        };

        let artifacts = self.select_artifacts(edges, &mut summary);
        log::info!(
            "Scanning {} of {} dependencies for classes",
            artifacts.len(),
            edges.len()
        );

        let scanned = self.scan_artifacts(&artifacts)?;

        let mut aggregation = ClassAggregation::new();
        for (edge, result) in scanned {
            match result {
                Ok(paths) => {
                    log::debug!("{}: {} classes", edge.coordinate, paths.len());
                    summary.artifacts_scanned += 1;
                    aggregation.add_classes(paths, &edge.coordinate);
                }
                Err(source) => {
                    log::warn!("Skipping unreadable jar of {}: {}", edge, source);
                    summary.skipped_artifacts.push(SkippedArtifact {
                        artifact: edge.coordinate.clone(),
                        reason: source.to_string(),
                    });
                }
            }
        }

        let report = detect_duplicates(&aggregation);

        summary.class_entries = aggregation.contributions();
        summary.distinct_classes = aggregation.len();
        summary.duplicate_classes = report.len();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Found {} duplicate classes among {} classes in {} jars ({:.2?})",
            summary.duplicate_classes,
            summary.distinct_classes,
            summary.artifacts_scanned,
            summary.scan_duration
        );

        Ok((report, summary))
    }

    /// Apply the filter, keep jars only, and collapse edges sharing a
    /// coordinate to the first one. The result is in coordinate order.
    fn select_artifacts<'a>(
        &self,
        edges: &'a [DependencyEdge],
        summary: &mut ScanSummary,
    ) -> Vec<&'a DependencyEdge> {
        let mut selected: BTreeMap<&ArtifactCoordinate, &DependencyEdge> = BTreeMap::new();

        for edge in edges {
            if !self.filter.accept(edge) {
                log::trace!("Filtered out {}", edge);
                summary.filtered_out += 1;
                continue;
            }

            if !edge.is_jar() || (edge.is_root() && edge.file().is_none()) {
                log::trace!("Not scanning {}", edge);
                summary.not_scannable += 1;
                continue;
            }

            match selected.entry(&edge.coordinate) {
                Entry::Occupied(first) => {
                    log::debug!("Ignoring {}, already scanning {}", edge, first.get());
                    summary.shadowed_coordinates += 1;
                }
                Entry::Vacant(slot) => {
                    slot.insert(edge);
                }
            }
        }

        selected.into_values().collect()
    }

    /// Scan all selected jars, preserving input order in the result.
    ///
    /// In strict mode the first failure is returned as an error; otherwise
    /// failures are handed back per artifact.
    #[allow(clippy::type_complexity)]
    fn scan_artifacts<'a>(
        &self,
        artifacts: &[&'a DependencyEdge],
    ) -> Result<Vec<(&'a DependencyEdge, Result<Vec<ClassEntryPath>, ScanError>)>, FinderError>
    {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start(SCAN_PHASE, artifacts.len());
        }

        let completed = AtomicUsize::new(0);
        let scan_one = |edge: &'a DependencyEdge| {
            let result = match edge.file() {
                Some(path) => self.scanner.scan(path),
                None => Err(ScanError::NoFile),
            };
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(done, &edge.coordinate.to_string());
            }
            (edge, result)
        };

        let strict = self.config.strict;
        let run = || -> Result<Vec<_>, FinderError> {
            if strict {
                artifacts
                    .par_iter()
                    .map(|edge| match scan_one(*edge) {
                        (edge, Ok(paths)) => Ok((edge, Ok(paths))),
                        (edge, Err(source)) => Err(FinderError::Archive {
                            artifact: edge.to_string(),
                            source,
                        }),
                    })
                    .collect()
            } else {
                Ok(artifacts.par_iter().map(|edge| scan_one(*edge)).collect())
            }
        };

        let result = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(e) => {
                log::warn!(
                    "Failed to create scanning thread pool ({}), using global pool with {} threads",
                    e,
                    rayon::current_num_threads()
                );
                run()
            }
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end(SCAN_PHASE);
        }
        result
    }
}
