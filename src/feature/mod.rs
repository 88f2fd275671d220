//! The feature data model: features, bundles, dependencies, and
//! repositories.
//!
//! A *feature* is a named, versioned unit bundling deployable artifacts
//! (bundles) together with dependencies on other features. Features are
//! created by loading external descriptors at the start of a run - the
//! wire format is parsed by a collaborator, never here - and are treated
//! as immutable once loaded. The feature *name* is the primary matching
//! key across the system.
//!
//! [`FeatureRepositoryIndex`] (in [`index`]) holds the set of known
//! features keyed by their source URI and provides the name-based lookup
//! the resolver depends on.

pub mod index;

pub use index::FeatureRepositoryIndex;

use crate::coordinate::Coordinate;
use crate::version::VersionConstraint;

/// A single deployable artifact reference within a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// The artifact this bundle deploys
    pub location: Coordinate,
    /// Start level ordering activation; `None` means the assembler's
    /// configured default applies
    pub start_level: Option<u32>,
    /// A dependency bundle must be present in the artifact repository but
    /// is never scheduled to start
    pub dependency: bool,
}

impl Bundle {
    /// Creates a startable bundle with no explicit start level.
    pub fn new(location: Coordinate) -> Self {
        Self {
            location,
            start_level: None,
            dependency: false,
        }
    }

    /// Sets an explicit start level.
    #[must_use]
    pub const fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = Some(level);
        self
    }

    /// Marks this bundle as repository-only (never started).
    #[must_use]
    pub const fn as_dependency(mut self) -> Self {
        self.dependency = true;
        self
    }
}

/// An unresolved reference to another feature by name, with an optional
/// version constraint.
///
/// The constraint participates in the dependency's identity (two
/// dependencies on the same name with different constraints are distinct
/// for visit tracking), but lookup itself matches by name alone - see
/// [`FeatureRepositoryIndex::lookup_by_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the referenced feature
    pub name: String,
    /// Optional version constraint carried by the reference
    pub constraint: Option<VersionConstraint>,
}

impl Dependency {
    /// Creates an unconstrained dependency on `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraint: None,
        }
    }

    /// Attaches a version constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// The identity used by the resolver's visited set: name plus the
    /// rendered constraint.
    pub fn id(&self) -> DependencyId {
        DependencyId {
            name: self.name.clone(),
            constraint: self.constraint.as_ref().map(ToString::to_string),
        }
    }
}

/// Hashable identity of a [`Dependency`] (name + rendered constraint).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyId {
    name: String,
    constraint: Option<String>,
}

/// A named, versioned unit bundling deployable artifacts plus
/// dependencies on other features.
///
/// Immutable once loaded; bundle and dependency order is the descriptor's
/// declaration order and is preserved through resolution and assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Feature name, the primary matching key
    pub name: String,
    /// Feature version (opaque here; constraints are checked against it
    /// nowhere by design, see the index docs)
    pub version: String,
    /// Bundles contributed by this feature, in declaration order
    pub bundles: Vec<Bundle>,
    /// References to other features, in declaration order
    pub dependencies: Vec<Dependency>,
}

impl Feature {
    /// Creates an empty feature.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            bundles: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Appends a bundle, consuming and returning the feature.
    #[must_use]
    pub fn with_bundle(mut self, bundle: Bundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    /// Appends a dependency, consuming and returning the feature.
    #[must_use]
    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// The identity used by the resolver's resolved set: name plus
    /// version.
    pub fn id(&self) -> FeatureId {
        FeatureId {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

/// Hashable identity of a [`Feature`] (name + version).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId {
    name: String,
    version: String,
}

/// A source document declaring a set of features, identified by URI.
///
/// Reloading the same URI fully replaces its prior feature set; stale
/// entries never accumulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRepository {
    /// Source URI this repository was loaded from
    pub uri: String,
    /// Features declared by the source document
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionConstraint;

    #[test]
    fn test_dependency_identity_includes_constraint() {
        let plain = Dependency::new("transaction");
        let constrained = Dependency::new("transaction")
            .with_constraint(VersionConstraint::parse("[1.0,2.0)").unwrap());
        assert_ne!(plain.id(), constrained.id());
        assert_eq!(plain.id(), Dependency::new("transaction").id());
    }

    #[test]
    fn test_feature_identity_is_name_and_version() {
        let one = Feature::new("http", "4.1.0");
        let other = Feature::new("http", "4.2.0");
        assert_ne!(one.id(), other.id());
        assert_eq!(one.id(), Feature::new("http", "4.1.0").id());
    }
}
