//! Jar archive scanning.
//!
//! # Overview
//! [`ArchiveScanner`] opens one jar, walks its central directory in archive
//! order, and returns the class entries that take part in duplicate
//! detection. Entry contents are never decompressed. A path listed twice in
//! the directory is returned twice.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use zip::ZipArchive;

use super::{central_directory, is_class_entry, ClassEntryPath, ScanError};

/// Reads class entry paths from jar archives.
///
/// Stateless; one instance can be shared across scanning threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveScanner;

impl ArchiveScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// List the class entries of the jar at `path`, in archive order.
    ///
    /// Entries are kept only when they end in `.class`, are not
    /// `module-info.class`, and are not under `META-INF/versions`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the file is missing, cannot be opened, or is
    /// not a readable zip archive. Nothing is returned for a failed archive.
    pub fn scan(&self, path: &Path) -> Result<Vec<ClassEntryPath>, ScanError> {
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
            _ => ScanError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let archive =
            ZipArchive::new(BufReader::new(file)).map_err(|source| ScanError::Archive {
                path: path.to_path_buf(),
                source,
            })?;

        let indexed: Vec<String> = archive.file_names().map(str::to_owned).collect();
        let mut reader = archive.into_inner();
        let names = match central_directory::entry_names(&mut reader) {
            Ok(Some(names)) => names,
            Ok(None) => {
                log::debug!(
                    "{}: central directory not walkable, using the indexed listing",
                    path.display()
                );
                indexed
            }
            Err(source) => {
                return Err(ScanError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let total = names.len();
        let entries: Vec<ClassEntryPath> = names
            .into_iter()
            .filter(|name| is_class_entry(name))
            .filter_map(ClassEntryPath::new)
            .collect();

        log::trace!(
            "Scanned {}: {} of {} entries are classes",
            path.display(),
            entries.len(),
            total
        );
        Ok(entries)
    }
}
