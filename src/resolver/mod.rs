//! Transitive dependency-closure resolution over the feature graph.
//!
//! The resolver expands a seed set of explicitly included features into
//! the full set to install by walking feature-to-feature dependency edges
//! breadth-first to a fixed point.
//!
//! # Algorithm
//!
//! A worklist of pending [`Dependency`] values is processed against two
//! sets carried in a per-run [`ResolutionContext`]:
//!
//! - `visited`, keyed on dependency identity (name + rendered
//!   constraint): a popped dependency whose identity was already visited
//!   is skipped. This is what guarantees termination on cyclic feature
//!   graphs - each dependency identity is processed at most once no
//!   matter how many features re-reference it.
//! - `resolved`, keyed on feature identity (name + version): a found
//!   feature is added once, and only on first addition are its own
//!   dependencies enqueued.
//!
//! A dependency that no known feature satisfies is *not* an error: it is
//! dropped silently, recorded on the context's missing list for debug
//! logging only. Such dependencies represent capabilities assumed to be
//! satisfied externally.
//!
//! Transitive expansion runs only when enabled (the default); when
//! disabled the resolved set is exactly the explicit seeds, with no
//! dependency walking at all.
//!
//! The context is constructed fresh per run and threaded explicitly, so
//! the resolver itself is stateless and reentrant.

pub mod selector;

pub use selector::{DependencySelector, ExtensionSelector};

#[cfg(test)]
mod tests;

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::feature::{Dependency, DependencyId, Feature, FeatureId, FeatureRepositoryIndex};

/// The feature dependency-closure resolver.
///
/// # Examples
///
/// ```rust
/// use keel::feature::{Dependency, Feature, FeatureRepositoryIndex};
/// use keel::resolver::ClosureResolver;
///
/// let mut index = FeatureRepositoryIndex::new();
/// index.load(
///     "file:features.xml",
///     vec![Feature::new("transaction", "1.1.0")],
/// );
///
/// let seed = Feature::new("jpa", "2.0.0").with_dependency(Dependency::new("transaction"));
/// let resolution = ClosureResolver::new().resolve(&[seed], &index);
/// assert_eq!(resolution.features.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ClosureResolver {
    transitive: bool,
}

impl Default for ClosureResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ClosureResolver {
    /// Creates a resolver with transitive expansion enabled.
    pub const fn new() -> Self {
        Self { transitive: true }
    }

    /// Enables or disables transitive expansion. When disabled, the
    /// resolved set equals exactly the explicit seeds.
    #[must_use]
    pub const fn with_transitive(mut self, transitive: bool) -> Self {
        self.transitive = transitive;
        self
    }

    /// Resolves the dependency closure of `seeds` against `index`.
    ///
    /// Seeds are always part of the result, in their given order;
    /// transitively found features follow in discovery order. Duplicate
    /// seeds (by feature identity) collapse to one entry.
    pub fn resolve(&self, seeds: &[Feature], index: &FeatureRepositoryIndex) -> Resolution {
        let mut ctx = ResolutionContext::default();

        for seed in seeds {
            if ctx.resolved.insert(seed.id()) {
                if self.transitive {
                    ctx.enqueue(&seed.dependencies);
                }
                ctx.features.push(seed.clone());
            }
        }

        if self.transitive {
            self.expand(&mut ctx, index);
        }

        debug!(
            "Resolved {} feature(s), {} dependency reference(s) unsatisfied",
            ctx.features.len(),
            ctx.missing.len()
        );
        Resolution {
            features: ctx.features,
            missing: ctx.missing,
        }
    }

    /// Runs the worklist to its fixed point.
    fn expand(&self, ctx: &mut ResolutionContext, index: &FeatureRepositoryIndex) {
        while let Some(dependency) = ctx.worklist.pop_front() {
            if !ctx.visited.insert(dependency.id()) {
                continue;
            }
            let Some(feature) = index.lookup_by_name(&dependency.name) else {
                // Unresolved dependencies are not errors; the capability
                // is assumed to be satisfied externally.
                debug!("No feature satisfies dependency '{}', skipping", dependency.name);
                ctx.missing.push(dependency);
                continue;
            };
            if ctx.resolved.insert(feature.id()) {
                debug!(
                    "Dependency '{}' resolved to feature {}/{}",
                    dependency.name, feature.name, feature.version
                );
                ctx.enqueue(&feature.dependencies);
                ctx.features.push(feature.clone());
            }
        }
    }
}

/// Accumulated state of one resolution run.
///
/// Constructed fresh per run and threaded through the algorithm; never
/// shared across runs.
#[derive(Debug, Default)]
struct ResolutionContext {
    worklist: VecDeque<Dependency>,
    visited: HashSet<DependencyId>,
    resolved: HashSet<FeatureId>,
    features: Vec<Feature>,
    missing: Vec<Dependency>,
}

impl ResolutionContext {
    /// Enqueues dependencies whose identity has not been visited yet.
    fn enqueue(&mut self, dependencies: &[Dependency]) {
        for dependency in dependencies {
            if !self.visited.contains(&dependency.id()) {
                self.worklist.push_back(dependency.clone());
            }
        }
    }
}

/// Outcome of a resolution run.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved feature set to install: seeds first (in given order),
    /// then transitively discovered features in discovery order
    pub features: Vec<Feature>,
    /// Dependency references no known feature satisfied, in processing
    /// order; informational only
    pub missing: Vec<Dependency>,
}
