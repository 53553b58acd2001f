//! Coordinate pattern exclusions.
//!
//! Patterns have the form `groupId:artifactId[:extension[:classifier]]`.
//! Every segment is a glob, so `*` matches any value and `org.apache.*`,
//! `*-api` or `*servlet*` match by prefix, suffix or infix. Segments left off
//! the end of a pattern match anything.

use std::str::FromStr;

use globset::{Glob, GlobMatcher};

use crate::dependency::DependencyEdge;

/// Maximum number of segments in a pattern.
const MAX_SEGMENTS: usize = 4;

/// Errors raised while parsing exclusion patterns.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The pattern does not have the `groupId:artifactId[:extension[:classifier]]` shape.
    #[error(
        "Invalid exclusion pattern '{0}': expected groupId:artifactId[:extension[:classifier]]"
    )]
    Malformed(String),

    /// A segment is not a valid glob.
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    Glob {
        /// The offending pattern
        pattern: String,
        /// The underlying glob error
        #[source]
        source: globset::Error,
    },
}

/// A single parsed exclusion pattern.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    /// Matchers for group, artifact and the optional extension and classifier.
    /// `None` marks an empty optional segment, which matches anything.
    segments: Vec<Option<GlobMatcher>>,
}

impl ExclusionPattern {
    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `edge` matches this pattern.
    #[must_use]
    pub fn matches(&self, edge: &DependencyEdge) -> bool {
        let values = [
            edge.coordinate.group_id.as_str(),
            edge.coordinate.artifact_id.as_str(),
            edge.extension.as_str(),
            edge.classifier.as_deref().unwrap_or(""),
        ];

        self.segments
            .iter()
            .zip(values)
            .all(|(segment, value)| segment.as_ref().map_or(true, |m| m.is_match(value)))
    }
}

impl FromStr for ExclusionPattern {
    type Err = FilterError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let raw = pattern.trim();
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() < 2 || parts.len() > MAX_SEGMENTS || parts[..2].iter().any(|p| p.is_empty())
        {
            return Err(FilterError::Malformed(pattern.to_string()));
        }

        let segments = parts
            .iter()
            .map(|part| {
                if part.is_empty() {
                    return Ok(None);
                }
                Glob::new(part)
                    .map(|glob| Some(glob.compile_matcher()))
                    .map_err(|source| FilterError::Glob {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }
}

/// Rejects dependencies whose coordinate matches any configured pattern.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionFilter {
    /// Parse a list of patterns into a filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first pattern that fails to parse.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let patterns = patterns
            .iter()
            .map(|p| p.as_ref().parse())
            .collect::<Result<Vec<ExclusionPattern>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether no patterns are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Configured patterns.
    #[must_use]
    pub fn patterns(&self) -> &[ExclusionPattern] {
        &self.patterns
    }

    /// Whether `edge` survives the exclusions.
    #[must_use]
    pub fn accept(&self, edge: &DependencyEdge) -> bool {
        match self.patterns.iter().find(|p| p.matches(edge)) {
            Some(pattern) => {
                log::debug!("Excluding {} (matches '{}')", edge, pattern.as_str());
                false
            }
            None => true,
        }
    }
}
