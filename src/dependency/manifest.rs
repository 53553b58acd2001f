//! JSON dependency manifest reader.
//!
//! The host build tool resolves the dependency graph and writes the result as
//! a JSON manifest:
//!
//! ```json
//! {
//!   "dependencies": [
//!     {
//!       "groupId": "javax.servlet",
//!       "artifactId": "servlet-api",
//!       "version": "2.5",
//!       "extension": "jar",
//!       "scope": "compile",
//!       "file": "/home/me/.m2/repository/javax/servlet/servlet-api/2.5/servlet-api-2.5.jar"
//!     }
//!   ]
//! }
//! ```
//!
//! `extension` defaults to `jar`. `scope` and `file` may only be omitted for
//! the synthetic root. Relative files resolve against the manifest directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{DependencyEdge, DependencyResolver, ResolutionError, Scope, JAR_EXTENSION};

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    dependencies: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    group_id: String,
    artifact_id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    classifier: Option<String>,
    #[serde(default = "default_extension")]
    extension: String,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    file: Option<PathBuf>,
}

fn default_extension() -> String {
    JAR_EXTENSION.to_string()
}

/// Resolver backed by a dependency manifest file.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    path: PathBuf,
}

impl ManifestResolver {
    /// Create a resolver reading the manifest at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the manifest.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse manifest content as if it had been read from this resolver's path.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] for malformed JSON, unknown scopes, or
    /// non-root dependencies without a file.
    pub fn parse(&self, content: &str) -> Result<Vec<DependencyEdge>, ResolutionError> {
        let manifest: RawManifest =
            serde_json::from_str(content).map_err(|source| ResolutionError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        manifest
            .dependencies
            .into_iter()
            .map(|raw| convert_edge(raw, base_dir))
            .collect()
    }
}

impl DependencyResolver for ManifestResolver {
    fn resolve(&self) -> Result<Vec<DependencyEdge>, ResolutionError> {
        if !self.path.exists() {
            return Err(ResolutionError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ResolutionError::Io {
            path: self.path.clone(),
            source,
        })?;

        let edges = self.parse(&content)?;
        log::debug!(
            "Resolved {} dependencies from {}",
            edges.len(),
            self.path.display()
        );
        Ok(edges)
    }
}

fn convert_edge(raw: RawEdge, base_dir: &Path) -> Result<DependencyEdge, ResolutionError> {
    let mut edge = DependencyEdge::new(raw.group_id, raw.artifact_id, raw.version)
        .with_extension(raw.extension);
    edge.classifier = raw.classifier.filter(|c| !c.is_empty());

    if let Some(label) = raw.scope {
        let scope = label
            .parse::<Scope>()
            .map_err(|source| ResolutionError::UnknownScope {
                artifact: edge.to_string(),
                source,
            })?;
        edge.scope = Some(scope);
    }

    match raw.file {
        Some(file) if file.is_relative() => edge.file = Some(base_dir.join(file)),
        Some(file) => edge.file = Some(file),
        None if edge.is_root() => {}
        None => return Err(ResolutionError::Unresolved(edge.to_string())),
    }

    Ok(edge)
}
