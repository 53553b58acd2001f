//! Scanner module for reading class entries out of jar archives.
//!
//! This module provides functionality for:
//! - Opening a jar and listing its class-bearing entries
//! - Skipping module descriptors and multi-release copies
//! - Translating between entry paths and fully-qualified class names
//!
//! # Architecture
//!
//! - [`archive`]: the [`ArchiveScanner`] that reads one jar's central directory
//! - [`ClassEntryPath`]: the archive-internal path used as aggregation key
//!
//! # Example
//!
//! ```no_run
//! use jardupe::scanner::ArchiveScanner;
//! use std::path::Path;
//!
//! let scanner = ArchiveScanner::new();
//! for entry in scanner.scan(Path::new("lib/commons-lang3.jar")).unwrap() {
//!     println!("{} -> {}", entry, entry.to_class_name());
//! }
//! ```

pub mod archive;
mod central_directory;

use std::fmt;
use std::path::PathBuf;

pub use archive::ArchiveScanner;

/// Suffix of class file entries.
pub const CLASS_SUFFIX: &str = ".class";

/// Java module descriptor; never a duplicate candidate.
pub const MODULE_DESCRIPTOR: &str = "module-info.class";

/// Prefix of multi-release alternates, which are copies of the same class.
pub const MULTI_RELEASE_PREFIX: &str = "META-INF/versions";

/// Separator used inside archive entry names.
pub const PATH_SEPARATOR: char = '/';

/// Separator used in fully-qualified class names.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Whether an archive entry name is a class that takes part in duplicate analysis.
#[must_use]
pub fn is_class_entry(name: &str) -> bool {
    name.ends_with(CLASS_SUFFIX)
        && name != MODULE_DESCRIPTOR
        && !name.starts_with(MULTI_RELEASE_PREFIX)
}

/// Archive-internal path of a class file, e.g. `com/example/Foo.class`.
///
/// Always ends with [`CLASS_SUFFIX`]. Kept in path form until duplicate
/// detection so non-duplicated entries are never translated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassEntryPath(String);

impl ClassEntryPath {
    /// Wrap an entry name, returning `None` unless it ends with `.class`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        name.ends_with(CLASS_SUFFIX).then_some(Self(name))
    }

    /// Build the entry path for a fully-qualified class name.
    #[must_use]
    pub fn from_class_name(class_name: &str) -> Self {
        let mut path = class_name.replace(NAMESPACE_SEPARATOR, "/");
        path.push_str(CLASS_SUFFIX);
        Self(path)
    }

    /// The entry name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully-qualified class name: suffix stripped, `/` replaced by `.`.
    #[must_use]
    pub fn to_class_name(&self) -> String {
        self.0[..self.0.len() - CLASS_SUFFIX.len()].replace(PATH_SEPARATOR, ".")
    }
}

impl fmt::Display for ClassEntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur while reading an artifact archive.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The artifact has no file to read.
    #[error("No artifact file resolved")]
    NoFile,

    /// The artifact file does not exist.
    #[error("Artifact file not found: {0}")]
    NotFound(PathBuf),

    /// The artifact file could not be opened.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path of the archive
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not a readable zip archive.
    #[error("Corrupt archive {path}: {source}")]
    Archive {
        /// Path of the archive
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },
}
