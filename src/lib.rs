//! keel - feature-graph runtime distribution assembler
//!
//! keel assembles a runtime distribution from a declarative graph of named
//! *features* (versioned bundles of deployable artifacts plus dependencies on
//! other features) into a flat, conflict-resolved installation set with a
//! deterministic bundle startup order. It runs at build time, consuming
//! already-materialized feature descriptors and artifact files, and producing:
//!
//! - a persisted startup manifest mapping each bundle to a start level, and
//! - a populated artifact repository on disk.
//!
//! # Architecture Overview
//!
//! keel follows a resolve-then-assemble model:
//! - Feature repositories are loaded into a [`feature::FeatureRepositoryIndex`]
//! - Explicit inclusion lists seed the [`resolver::ClosureResolver`], which
//!   expands the transitive dependency closure with cycle safety
//! - The resolved feature set flows into the [`assembler::StartupAssembler`],
//!   which merges bundles into the startup manifest and stages artifacts
//!   into the repository layout
//!
//! # Core Modules
//!
//! - [`coordinate`] - Artifact identity and conversions among the short mvn
//!   URL form, the canonical `group:artifact:version` form, and the
//!   filesystem repository path
//! - [`version`] - Multi-component version ordering and point/range
//!   version constraints
//! - [`feature`] - The feature data model and the repository index with
//!   name-based lookup
//! - [`resolver`] - Transitive dependency-closure resolution and the
//!   type-filtering dependency selector
//! - [`manifest`] - The comment-preserving, ordered startup manifest with
//!   its own parse/serialize routines
//! - [`assembler`] - Startup-manifest merging and idempotent artifact
//!   staging with per-artifact failure isolation
//!
//! ## Supporting Modules
//!
//! - [`metadata`] - Snapshot repository-metadata descriptor generation
//! - [`source`] - The [`source::ArtifactResolver`] collaborator contract
//!   mapping a coordinate to a local file
//! - [`utils`] - Filesystem helpers (atomic writes, directory creation)
//! - [`core`] - Error types shared across the crate
//!
//! # Example
//!
//! ```rust,no_run
//! use keel::assembler::{AssemblyConfig, StartupAssembler};
//! use keel::feature::{Feature, FeatureRepositoryIndex};
//! use keel::resolver::ClosureResolver;
//! use keel::source::LocalRepositoryResolver;
//! use std::path::PathBuf;
//!
//! # fn example(features: Vec<Feature>, seeds: Vec<Feature>) -> anyhow::Result<()> {
//! let mut index = FeatureRepositoryIndex::new();
//! index.load("file:framework-features.xml", features);
//!
//! let resolution = ClosureResolver::new().resolve(&seeds, &index);
//!
//! let config = AssemblyConfig::new(PathBuf::from("target/assembly"));
//! let artifacts = LocalRepositoryResolver::new(PathBuf::from("/home/user/.m2/repository"));
//! let report = StartupAssembler::new(config, artifacts).assemble(&resolution.features)?;
//! println!("staged {} artifacts", report.artifacts_staged);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Structural failures (malformed version constraints, unreadable or
//! unwritable startup manifests) abort immediately. Per-artifact staging
//! failures are buffered so the rest of the batch completes and persists;
//! a single aggregate [`core::KeelError::AssemblyIncomplete`] is returned
//! after all unaffected work is already durable. A dependency naming an
//! absent feature is not an error at all: it is dropped silently and
//! recorded for debug logging only.

pub mod assembler;
pub mod constants;
pub mod coordinate;
pub mod core;
pub mod feature;
pub mod manifest;
pub mod metadata;
pub mod resolver;
pub mod source;
pub mod utils;
pub mod version;
