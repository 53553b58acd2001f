//! Dependency filters deciding which edges are scanned.
//!
//! This module provides:
//! - [`ScopeFilter`]: keeps `compile` and `runtime` dependencies
//! - [`ExclusionFilter`]: drops dependencies matching user patterns
//! - [`DependencyFilter`]: the closed set of filter variants, including the
//!   logical AND of two filters
//!
//! # Example
//!
//! ```
//! use jardupe::dependency::{DependencyEdge, Scope};
//! use jardupe::filter::DependencyFilter;
//!
//! let filter = DependencyFilter::for_excludes(&["g1:a2"]).unwrap();
//!
//! let kept = DependencyEdge::new("g1", "a1", "1").with_scope(Scope::Compile);
//! let excluded = DependencyEdge::new("g1", "a2", "1").with_scope(Scope::Compile);
//! let test_only = DependencyEdge::new("g1", "a3", "1").with_scope(Scope::Test);
//!
//! assert!(filter.accept(&kept));
//! assert!(!filter.accept(&excluded));
//! assert!(!filter.accept(&test_only));
//! ```

pub mod exclusion;
pub mod scope;

pub use exclusion::{ExclusionFilter, ExclusionPattern, FilterError};
pub use scope::ScopeFilter;

use crate::dependency::DependencyEdge;

/// Predicate over a dependency edge.
#[derive(Debug, Clone)]
pub enum DependencyFilter {
    /// Scope-based filter
    Scope(ScopeFilter),
    /// Pattern exclusions
    Exclusion(ExclusionFilter),
    /// Both filters must accept
    And(Box<DependencyFilter>, Box<DependencyFilter>),
}

impl DependencyFilter {
    /// Build the filter for a run: the scope filter, AND the exclusion filter
    /// when any patterns are configured.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if a pattern is malformed.
    pub fn for_excludes<S: AsRef<str>>(excludes: &[S]) -> Result<Self, FilterError> {
        let scope = DependencyFilter::Scope(ScopeFilter::new());
        if excludes.is_empty() {
            return Ok(scope);
        }

        let exclusions = ExclusionFilter::new(excludes)?;
        Ok(scope.and(DependencyFilter::Exclusion(exclusions)))
    }

    /// Combine with another filter using logical AND.
    #[must_use]
    pub fn and(self, other: DependencyFilter) -> Self {
        DependencyFilter::And(Box::new(self), Box::new(other))
    }

    /// Whether `edge` passes the filter.
    #[must_use]
    pub fn accept(&self, edge: &DependencyEdge) -> bool {
        match self {
            DependencyFilter::Scope(filter) => filter.accept(edge),
            DependencyFilter::Exclusion(filter) => filter.accept(edge),
            DependencyFilter::And(left, right) => left.accept(edge) && right.accept(edge),
        }
    }
}

impl Default for DependencyFilter {
    fn default() -> Self {
        DependencyFilter::Scope(ScopeFilter::new())
    }
}
