//! Resolved dependency model.
//!
//! This module defines the records handed to the pipeline by a dependency
//! resolver:
//! - [`ArtifactCoordinate`]: the `group:artifact` identity used for ordering
//!   and reporting
//! - [`Scope`]: how a dependency is used by the project
//! - [`DependencyEdge`]: one resolved node of the dependency graph
//!
//! Resolution itself happens outside this crate. The [`DependencyResolver`]
//! trait is the seam: [`ManifestResolver`] reads the JSON manifest written by
//! the host build tool, and a plain `Vec<DependencyEdge>` can be used directly.
//!
//! # Example
//!
//! ```
//! use jardupe::dependency::{DependencyEdge, DependencyResolver, Scope};
//!
//! let edges = vec![
//!     DependencyEdge::new("javax.servlet", "servlet-api", "2.5")
//!         .with_scope(Scope::Compile)
//!         .with_file("/repo/servlet-api-2.5.jar"),
//! ];
//!
//! let resolved = edges.resolve().unwrap();
//! assert_eq!(resolved[0].coordinate.to_string(), "javax.servlet:servlet-api");
//! ```

pub mod manifest;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use manifest::ManifestResolver;

/// Extension of artifacts that are scanned for classes.
pub const JAR_EXTENSION: &str = "jar";

/// The `(group id, artifact id)` pair identifying a dependency.
///
/// Ordering is by group id, then artifact id, using plain string comparison.
/// Field order matters: the derived `Ord` relies on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    /// Group id (e.g. `org.apache.commons`)
    pub group_id: String,
    /// Artifact id (e.g. `commons-lang3`)
    pub artifact_id: String,
}

impl ArtifactCoordinate {
    /// Create a new coordinate.
    #[must_use]
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Dependency scope label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Needed to compile and run
    Compile,
    /// Needed at runtime only
    Runtime,
    /// Supplied by the runtime environment
    Provided,
    /// Only on the test class path
    Test,
    /// Like provided, but pointing at an explicit local file
    System,
    /// Dependency management import
    Import,
}

impl Scope {
    /// All known scopes.
    pub const ALL: [Scope; 6] = [
        Scope::Compile,
        Scope::Runtime,
        Scope::Provided,
        Scope::Test,
        Scope::System,
        Scope::Import,
    ];

    /// The scope label as written in manifests.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scope label is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scope '{label}'{hint}")]
pub struct UnknownScope {
    /// The label that failed to parse
    pub label: String,
    /// Rendered suggestion, empty when nothing is close enough
    hint: String,
}

impl UnknownScope {
    fn new(label: &str) -> Self {
        let candidates = Scope::ALL.map(Scope::as_str);
        let hint = crate::suggest::closest(label, &candidates)
            .map(|s| format!(" (did you mean '{s}'?)"))
            .unwrap_or_default();
        Self {
            label: label.to_string(),
            hint,
        }
    }
}

impl FromStr for Scope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| UnknownScope::new(s))
    }
}

/// One resolved node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    /// Group and artifact id
    pub coordinate: ArtifactCoordinate,
    /// Resolved version
    pub version: String,
    /// Optional classifier (e.g. `sources`, `jdk8`)
    pub classifier: Option<String>,
    /// Extension / packaging type of the binary artifact
    pub extension: String,
    /// Scope label; `None` for a synthetic graph root
    pub scope: Option<Scope>,
    /// Local path of the binary artifact
    pub file: Option<PathBuf>,
}

impl DependencyEdge {
    /// Create a jar edge without scope or file.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            coordinate: ArtifactCoordinate::new(group_id, artifact_id),
            version: version.into(),
            classifier: None,
            extension: JAR_EXTENSION.to_string(),
            scope: None,
            file: None,
        }
    }

    /// Set the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the artifact file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Set the extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Whether this edge is a synthetic root without dependency information.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.scope.is_none()
    }

    /// Whether the binary artifact is a jar archive.
    #[must_use]
    pub fn is_jar(&self) -> bool {
        self.extension == JAR_EXTENSION
    }

    /// Local path of the binary artifact, if resolved.
    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl fmt::Display for DependencyEdge {
    /// `group:artifact:extension[:classifier]:version`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.coordinate, self.extension)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.version)
    }
}

/// Errors that can occur while obtaining the resolved dependency list.
#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    /// The dependency manifest does not exist.
    #[error("Dependency manifest not found: {0}")]
    NotFound(PathBuf),

    /// The dependency manifest could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Manifest path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The dependency manifest is not valid JSON or has the wrong shape.
    #[error("Malformed dependency manifest {path}: {source}")]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A dependency carries a scope label that is not recognised.
    #[error("Dependency {artifact}: {source}")]
    UnknownScope {
        /// The offending dependency
        artifact: String,
        /// Parse failure with suggestion
        #[source]
        source: UnknownScope,
    },

    /// A dependency was listed without a resolved artifact file.
    #[error("Dependency {0} has no resolved artifact file")]
    Unresolved(String),
}

/// Source of resolved dependency edges.
///
/// Resolution is a single blocking call producing the full list before any
/// scanning starts.
pub trait DependencyResolver {
    /// Resolve the dependency graph into an ordered list of edges.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] if the graph cannot be produced.
    fn resolve(&self) -> Result<Vec<DependencyEdge>, ResolutionError>;
}

impl DependencyResolver for Vec<DependencyEdge> {
    fn resolve(&self) -> Result<Vec<DependencyEdge>, ResolutionError> {
        Ok(self.clone())
    }
}

impl DependencyResolver for [DependencyEdge] {
    fn resolve(&self) -> Result<Vec<DependencyEdge>, ResolutionError> {
        Ok(self.to_vec())
    }
}
