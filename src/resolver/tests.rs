//! Tests for the closure resolver.

use super::*;
use crate::version::VersionConstraint;

fn feature(name: &str, version: &str, deps: &[&str]) -> Feature {
    deps.iter().fold(Feature::new(name, version), |feature, dep| {
        feature.with_dependency(Dependency::new(*dep))
    })
}

fn names(resolution: &Resolution) -> Vec<&str> {
    resolution.features.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_seeds_only_when_transitive_disabled() {
    let mut index = FeatureRepositoryIndex::new();
    index.load("uri", vec![feature("b", "1.0", &[])]);

    let seed = feature("a", "1.0", &["b"]);
    let resolution = ClosureResolver::new()
        .with_transitive(false)
        .resolve(&[seed], &index);

    assert_eq!(names(&resolution), vec!["a"]);
    assert!(resolution.missing.is_empty());
}

#[test]
fn test_transitive_chain_is_expanded() {
    let mut index = FeatureRepositoryIndex::new();
    index.load(
        "uri",
        vec![feature("b", "1.0", &["c"]), feature("c", "1.0", &[])],
    );

    let resolution = ClosureResolver::new().resolve(&[feature("a", "1.0", &["b"])], &index);
    assert_eq!(names(&resolution), vec!["a", "b", "c"]);
}

#[test]
fn test_mutual_cycle_terminates_with_both_features() {
    let mut index = FeatureRepositoryIndex::new();
    index.load(
        "uri",
        vec![feature("a", "1.0", &["b"]), feature("b", "1.0", &["a"])],
    );

    let seed = index.lookup_by_name("a").unwrap().clone();
    let resolution = ClosureResolver::new().resolve(&[seed], &index);

    assert_eq!(names(&resolution), vec!["a", "b"]);
}

#[test]
fn test_self_referential_feature_terminates() {
    let mut index = FeatureRepositoryIndex::new();
    index.load("uri", vec![feature("a", "1.0", &["a"])]);

    let seed = index.lookup_by_name("a").unwrap().clone();
    let resolution = ClosureResolver::new().resolve(&[seed], &index);
    assert_eq!(names(&resolution), vec!["a"]);
}

#[test]
fn test_diamond_resolves_each_feature_once() {
    let mut index = FeatureRepositoryIndex::new();
    index.load(
        "uri",
        vec![
            feature("left", "1.0", &["base"]),
            feature("right", "1.0", &["base"]),
            feature("base", "1.0", &[]),
        ],
    );

    let resolution =
        ClosureResolver::new().resolve(&[feature("top", "1.0", &["left", "right"])], &index);
    assert_eq!(names(&resolution), vec!["top", "left", "right", "base"]);
}

#[test]
fn test_unresolved_dependency_is_dropped_silently() {
    let index = FeatureRepositoryIndex::new();
    let resolution =
        ClosureResolver::new().resolve(&[feature("a", "1.0", &["no-such-feature"])], &index);

    assert_eq!(names(&resolution), vec!["a"]);
    assert_eq!(resolution.missing.len(), 1);
    assert_eq!(resolution.missing[0].name, "no-such-feature");
}

#[test]
fn test_name_only_matching_ignores_constraint() {
    let mut index = FeatureRepositoryIndex::new();
    index.load("uri", vec![feature("b", "1.0", &[])]);

    // The constraint asks for 2.0; the 1.0 feature still satisfies the
    // dependency because matching is by name alone.
    let seed = Feature::new("a", "1.0").with_dependency(
        Dependency::new("b").with_constraint(VersionConstraint::parse("[2.0,3.0)").unwrap()),
    );
    let resolution = ClosureResolver::new().resolve(&[seed], &index);

    assert_eq!(names(&resolution), vec!["a", "b"]);
    assert!(resolution.missing.is_empty());
}

#[test]
fn test_distinct_constraints_are_distinct_dependency_identities() {
    // Two features depend on "b" under different constraints; both
    // identities are visited, but "b" is resolved only once.
    let mut index = FeatureRepositoryIndex::new();
    index.load("uri", vec![feature("b", "1.0", &[])]);

    let seed1 = Feature::new("a1", "1.0").with_dependency(
        Dependency::new("b").with_constraint(VersionConstraint::parse("1.0").unwrap()),
    );
    let seed2 = Feature::new("a2", "1.0").with_dependency(
        Dependency::new("b").with_constraint(VersionConstraint::parse("[1.0,2.0)").unwrap()),
    );
    let resolution = ClosureResolver::new().resolve(&[seed1, seed2], &index);

    assert_eq!(names(&resolution), vec!["a1", "a2", "b"]);
}

#[test]
fn test_duplicate_seeds_collapse() {
    let index = FeatureRepositoryIndex::new();
    let seed = feature("a", "1.0", &[]);
    let resolution = ClosureResolver::new().resolve(&[seed.clone(), seed], &index);
    assert_eq!(names(&resolution), vec!["a"]);
}
