//! Edge filtering for external dependency-graph traversals.
//!
//! When the feature graph is walked by a collaborator traversal engine,
//! the engine asks a selector whether to follow each artifact edge. The
//! selector is a pure, stateless predicate: deriving a child selector for
//! a deeper traversal context returns an identical selector, and two
//! selectors compare equal iff their allow-lists are equal - which is
//! what makes traversal results cacheable by selector identity.

use std::collections::BTreeSet;

use crate::coordinate::Coordinate;

/// Predicate deciding whether a traversal follows an artifact edge.
pub trait DependencySelector {
    /// Whether the edge to `artifact` should be followed.
    fn select(&self, artifact: &Coordinate) -> bool;

    /// The selector to use for the child context one level deeper.
    fn derive_child(&self) -> Box<dyn DependencySelector>;
}

/// Selects edges whose artifact type is on an allow-list.
///
/// # Examples
///
/// ```rust
/// use keel::coordinate::Coordinate;
/// use keel::resolver::{DependencySelector, ExtensionSelector};
///
/// let selector = ExtensionSelector::new(["jar", "war"]);
/// assert!(selector.select(&Coordinate::new("g", "a", "1.0")));
/// assert!(!selector.select(&Coordinate::new("g", "a", "1.0").with_extension("pom")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionSelector {
    allowed: BTreeSet<String>,
}

impl ExtensionSelector {
    /// Creates a selector allowing exactly the given artifact types.
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: types.into_iter().map(Into::into).collect(),
        }
    }

    /// The allow-list backing this selector.
    pub fn allowed(&self) -> &BTreeSet<String> {
        &self.allowed
    }
}

impl DependencySelector for ExtensionSelector {
    fn select(&self, artifact: &Coordinate) -> bool {
        self.allowed.contains(&artifact.extension)
    }

    fn derive_child(&self) -> Box<dyn DependencySelector> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_select_by_extension() {
        let selector = ExtensionSelector::new(["jar"]);
        assert!(selector.select(&Coordinate::new("g", "a", "1.0")));
        assert!(!selector.select(&Coordinate::new("g", "a", "1.0").with_extension("xml")));
    }

    #[test]
    fn test_child_selector_is_identical() {
        let selector = ExtensionSelector::new(["jar", "war"]);
        let child = selector.derive_child();
        let jar = Coordinate::new("g", "a", "1.0");
        let pom = Coordinate::new("g", "a", "1.0").with_extension("pom");
        assert_eq!(selector.select(&jar), child.select(&jar));
        assert_eq!(selector.select(&pom), child.select(&pom));
    }

    #[test]
    fn test_equality_over_allow_list() {
        let a = ExtensionSelector::new(["war", "jar"]);
        let b = ExtensionSelector::new(["jar", "war"]);
        let c = ExtensionSelector::new(["jar"]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        // Usable as a cache key.
        let mut cache = HashSet::new();
        cache.insert(a);
        assert!(cache.contains(&b));
        assert!(!cache.contains(&c));
    }
}
