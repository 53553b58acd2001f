//! Decides whether an analysis needs to run at all.
//!
//! A [`ChangeGate`] is consulted before the pipeline starts. [`AlwaysRun`]
//! never skips. [`DigestStampGate`] compares the SHA-256 digest of the
//! dependency manifest with the digest stored in a stamp file by the last
//! successful run, and only lets the analysis through when they differ.
//! The stamp is written by [`ChangeGate::commit`], which callers invoke only
//! after a passing run, so a failing build is re-checked next time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Errors raised while consulting or updating a gate.
#[derive(thiserror::Error, Debug)]
pub enum GateError {
    /// The watched file or the stamp could not be read or written.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path of the failing file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Whether the analysis should run.
pub trait ChangeGate {
    /// `true` when the inputs changed since the last recorded success.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the inputs cannot be read.
    fn should_run(&self) -> Result<bool, GateError>;

    /// Record the current inputs as successfully analysed.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] if the record cannot be written.
    fn commit(&self) -> Result<(), GateError> {
        Ok(())
    }
}

/// Gate that always lets the analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRun;

impl ChangeGate for AlwaysRun {
    fn should_run(&self) -> Result<bool, GateError> {
        Ok(true)
    }
}

/// Gate keyed on the SHA-256 digest of a watched file plus a settings
/// fingerprint.
#[derive(Debug, Clone)]
pub struct DigestStampGate {
    watched: PathBuf,
    stamp: PathBuf,
    settings: String,
}

impl DigestStampGate {
    /// Watch `watched`, recording digests in `stamp`.
    #[must_use]
    pub fn new(watched: impl Into<PathBuf>, stamp: impl Into<PathBuf>) -> Self {
        Self {
            watched: watched.into(),
            stamp: stamp.into(),
            settings: String::new(),
        }
    }

    /// Fold `settings` into the digest, so a change to them re-runs the
    /// analysis even when the watched file is unchanged.
    #[must_use]
    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Path of the stamp file.
    #[must_use]
    pub fn stamp_path(&self) -> &Path {
        &self.stamp
    }

    /// Hex SHA-256 digest of the watched file followed by the settings.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Io`] if the file cannot be read.
    pub fn digest(&self) -> Result<String, GateError> {
        let bytes = fs::read(&self.watched).map_err(|source| GateError::Io {
            path: self.watched.clone(),
            source,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hasher.update(self.settings.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    fn recorded_digest(&self) -> Result<Option<String>, GateError> {
        match fs::read_to_string(&self.stamp) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GateError::Io {
                path: self.stamp.clone(),
                source,
            }),
        }
    }
}

impl ChangeGate for DigestStampGate {
    fn should_run(&self) -> Result<bool, GateError> {
        let current = self.digest()?;
        let changed = self.recorded_digest()?.as_deref() != Some(current.as_str());
        if !changed {
            log::debug!(
                "{} unchanged since last check (sha256 {})",
                self.watched.display(),
                current
            );
        }
        Ok(changed)
    }

    fn commit(&self) -> Result<(), GateError> {
        let digest = self.digest()?;
        if let Some(parent) = self.stamp.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.stamp, format!("{digest}\n")).map_err(|source| GateError::Io {
            path: self.stamp.clone(),
            source,
        })?;
        log::debug!("Recorded sha256 {} in {}", digest, self.stamp.display());
        Ok(())
    }
}
