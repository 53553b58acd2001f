//! Scope-based dependency filter.

use crate::dependency::{DependencyEdge, Scope};

/// Accepts only `compile` and `runtime` dependencies.
///
/// A synthetic root without dependency information is always accepted so the
/// graph root is never pruned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFilter;

impl ScopeFilter {
    /// Create the filter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether `edge` takes part in duplicate analysis.
    #[must_use]
    pub fn accept(&self, edge: &DependencyEdge) -> bool {
        match edge.scope {
            None => true,
            Some(scope) => matches!(scope, Scope::Compile | Scope::Runtime),
        }
    }
}
