//! Index of known features, keyed by source URI, with name-based lookup.

use tracing::debug;

use super::{Feature, FeatureRepository};

/// Held set of known features across all loaded repositories.
///
/// Repositories keep their load order, so lookups are deterministic:
/// [`lookup_by_name`](Self::lookup_by_name) scans repositories in the
/// order they were first loaded and features in declaration order.
///
/// # Name-only matching
///
/// Lookup matches by feature *name alone*; the version constraint on the
/// originating dependency is deliberately not checked against the found
/// feature's version. A dependency requesting version `2.0` is satisfied
/// by a feature at any version sharing the name. This is a preserved
/// limitation of the original behavior - adding version-aware matching
/// would be an explicit, documented design change, not a bug fix.
#[derive(Debug, Clone, Default)]
pub struct FeatureRepositoryIndex {
    repositories: Vec<FeatureRepository>,
}

impl FeatureRepositoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads (or reloads) the feature set for a source URI.
    ///
    /// Any previously loaded content for the exact same URI is fully
    /// replaced in place - repeated loads of one source never accumulate
    /// duplicate features, and the repository keeps its original position
    /// in the lookup order.
    pub fn load(&mut self, uri: impl Into<String>, features: Vec<Feature>) {
        let uri = uri.into();
        debug!("Loading feature repository {uri} ({} features)", features.len());
        match self.repositories.iter_mut().find(|repo| repo.uri == uri) {
            Some(existing) => existing.features = features,
            None => self.repositories.push(FeatureRepository { uri, features }),
        }
    }

    /// Removes the repository loaded from `uri`, if any.
    pub fn remove(&mut self, uri: &str) {
        self.repositories.retain(|repo| repo.uri != uri);
    }

    /// Returns the first feature matching `name`, scanning repositories
    /// in load order. Version constraints are not consulted (see the
    /// type-level docs).
    pub fn lookup_by_name(&self, name: &str) -> Option<&Feature> {
        self.repositories
            .iter()
            .flat_map(|repo| repo.features.iter())
            .find(|feature| feature.name == name)
    }

    /// All loaded repositories, in load order.
    pub fn repositories(&self) -> &[FeatureRepository] {
        &self.repositories
    }

    /// Iterates every known feature across all repositories.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.repositories.iter().flat_map(|repo| repo.features.iter())
    }
}
