//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML configuration file
//! 3. `JARDUPE_*` environment variables (e.g. `JARDUPE_STRICT=false`).
//!    `JARDUPE_EXCLUDES` takes a comma-separated list (`g:a,org.slf4j:*`)
//!    or an array (`["g:a", "org.slf4j:*"]`).
//! 4. Command-line flags ([`Config::apply_args`])
//!
//! The configuration file is the `--config` path when given, otherwise
//! `jardupe.toml` in the working directory, otherwise `config.toml` in the
//! platform configuration directory. Missing default locations are fine; a
//! missing explicit path or a malformed file is an error.
//!
//! ```toml
//! excludes = ["javax.servlet:servlet-api", "org.slf4j:*:jar:sources"]
//! skip = false
//! io_threads = 8
//! strict = true
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::CheckArgs;
use crate::duplicates::{default_io_threads, FinderConfig};
use crate::suggest;

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "JARDUPE_";

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "jardupe.toml";

const EXCLUDES_ENV: &str = "JARDUPE_EXCLUDES";

const KNOWN_KEYS: &[&str] = &["excludes", "skip", "io_threads", "strict"];

/// Errors that can occur while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// The configuration could not be parsed or has invalid values.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclusion patterns `groupId:artifactId[:extension[:classifier]]`.
    pub excludes: Vec<String>,
    /// Bypass the analysis entirely.
    pub skip: bool,
    /// Number of threads used to read jars.
    pub io_threads: usize,
    /// Fail on the first unreadable jar.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excludes: Vec::new(),
            skip: false,
            io_threads: default_io_threads(),
            strict: true,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// `explicit` is the `--config` path, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `explicit` does not exist or any layer is
    /// malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let path = locate(explicit, &working_dir, Self::user_config_path().as_deref())?;
        Self::extract(path.as_deref())
    }

    /// Load the layered configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file does not exist or is malformed.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Self::extract(Some(path))
    }

    fn extract(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            log::debug!("Loading configuration from {}", path.display());
            warn_unknown_keys(path);
            figment = figment.merge(Toml::file(path));
        }
        let listed_excludes = std::env::var(EXCLUDES_ENV)
            .ok()
            .filter(|raw| !raw.trim_start().starts_with('['));
        let mut env = Env::prefixed(ENV_PREFIX);
        if listed_excludes.is_some() {
            env = env.ignore(&["excludes"]);
        }
        figment = figment.merge(env);
        if let Some(raw) = listed_excludes {
            figment = figment.merge(Serialized::default("excludes", split_list(&raw)));
        }

        let config: Config = figment.extract().map_err(Box::new)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded layers.
    ///
    /// Excludes from the command line are appended to configured ones.
    pub fn apply_args(&mut self, args: &CheckArgs) {
        self.excludes.extend(args.excludes.iter().cloned());
        self.skip |= args.skip;
        if let Some(threads) = args.io_threads {
            self.io_threads = threads;
        }
        if args.no_strict {
            self.strict = false;
        }
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_excludes(self.excludes.clone())
            .with_io_threads(self.io_threads)
            .with_strict(self.strict)
    }

    /// Stable text form of the settings that change the verdict.
    ///
    /// `io_threads` and `skip` are left out; neither affects what a
    /// completed check reports.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        format!("excludes={:?};strict={}", self.excludes, self.strict)
    }

    /// Platform-specific user configuration file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "jardupe", "jardupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Split a comma-separated list, dropping blank items.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pick the configuration file to read, if any.
fn locate(
    explicit: Option<&Path>,
    working_dir: &Path,
    user_config: Option<&Path>,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(Some(path.to_path_buf()))
        } else {
            Err(ConfigError::NotFound(path.to_path_buf()))
        };
    }

    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }

    Ok(user_config.filter(|path| path.is_file()).map(Path::to_path_buf))
}

/// Warn about top-level keys that are not configuration settings.
///
/// Parse failures are left for figment to report.
fn warn_unknown_keys(path: &Path) {
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return;
    };

    for key in table.keys() {
        if KNOWN_KEYS.contains(&key.as_str()) {
            continue;
        }
        match suggest::closest(key, KNOWN_KEYS) {
            Some(hint) => log::warn!(
                "Unknown configuration key '{}' in {} (did you mean '{}'?)",
                key,
                path.display(),
                hint
            ),
            None => log::warn!(
                "Unknown configuration key '{}' in {}",
                key,
                path.display()
            ),
        }
    }
}
