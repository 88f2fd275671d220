//! Startup assembly: merging resolved features into the startup manifest
//! and staging their artifacts into the repository layout.
//!
//! For every startable bundle of every resolved feature the assembler
//! records a start level in the manifest; for every bundle (including
//! repository-only dependency bundles) it stages the artifact file into
//! the on-disk repository. Both halves are idempotent: a second run with
//! identical inputs performs zero copies and produces byte-identical
//! manifest output.
//!
//! # Merge policy
//!
//! A bundle's effective level is its own start level or the configured
//! default. When the manifest already holds an entry for the coordinate,
//! the entry is set to the *minimum* of the existing and effective
//! levels - once eager, never deferred. A later-processed feature can
//! only pull a bundle's start earlier, which makes the merge commutative:
//! the final level does not depend on feature processing order.
//!
//! The first bundle a feature newly contributes carries a leading comment
//! naming the feature and version; subsequent bundles from the same
//! feature carry none.
//!
//! # Failure semantics
//!
//! Per-artifact staging failures are appended to the run's error buffer
//! and processing continues. Only after all work is done and the manifest
//! has been persisted does a non-empty buffer turn into a single
//! aggregate [`KeelError::AssemblyIncomplete`]; completed side effects
//! are never rolled back. Manifest read/write failures, by contrast, are
//! fatal immediately. Snapshot-metadata problems are only warnings - the
//! staged artifact itself is intact, the snapshot may merely be
//! overridden by an older remote one later.


use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_START_LEVEL, SNAPSHOT_METADATA_FILE};
use crate::coordinate::Coordinate;
use crate::core::KeelError;
use crate::feature::Feature;
use crate::manifest::StartupManifest;
use crate::metadata::generate_snapshot_metadata;
use crate::source::ArtifactResolver;
use crate::utils::fs::{copy_artifact, ensure_dir};

/// Filesystem layout and defaults for one assembly target.
#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// Root of the artifact repository being populated
    pub system_directory: PathBuf,
    /// Path of the startup manifest file
    pub manifest_path: PathBuf,
    /// Start level for bundles that do not specify one
    pub default_start_level: u32,
}

impl AssemblyConfig {
    /// Creates the conventional layout under a work directory:
    /// `<work>/system` for the repository and
    /// `<work>/etc/startup.properties` for the manifest.
    pub fn new(work_directory: impl Into<PathBuf>) -> Self {
        let work = work_directory.into();
        Self {
            system_directory: work.join("system"),
            manifest_path: work.join("etc").join("startup.properties"),
            default_start_level: DEFAULT_START_LEVEL,
        }
    }

    /// Overrides the default start level.
    #[must_use]
    pub const fn with_default_start_level(mut self, level: u32) -> Self {
        self.default_start_level = level;
        self
    }
}

/// Counters describing what one assembly run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Manifest entries newly inserted
    pub entries_added: usize,
    /// Existing manifest entries pulled to an earlier start level
    pub entries_lowered: usize,
    /// Artifact files copied into the repository
    pub artifacts_staged: usize,
    /// Staging checks that found the artifact already present
    pub artifacts_present: usize,
}

/// Merges resolved features into the startup manifest and stages their
/// artifacts.
///
/// # Examples
///
/// ```rust,no_run
/// use keel::assembler::{AssemblyConfig, StartupAssembler};
/// use keel::feature::Feature;
/// use keel::source::LocalRepositoryResolver;
/// use std::path::PathBuf;
///
/// # fn example(features: Vec<Feature>) -> anyhow::Result<()> {
/// let assembler = StartupAssembler::new(
///     AssemblyConfig::new(PathBuf::from("target/assembly")),
///     LocalRepositoryResolver::new(PathBuf::from("/home/user/.m2/repository")),
/// );
/// let report = assembler.assemble(&features)?;
/// println!("{} staged, {} already present", report.artifacts_staged, report.artifacts_present);
/// # Ok(())
/// # }
/// ```
pub struct StartupAssembler<R> {
    config: AssemblyConfig,
    artifacts: R,
}

impl<R: ArtifactResolver> StartupAssembler<R> {
    /// Creates an assembler writing to `config`'s layout and resolving
    /// artifact files through `artifacts`.
    pub fn new(config: AssemblyConfig, artifacts: R) -> Self {
        Self { config, artifacts }
    }

    /// Runs one assembly pass over the resolved feature set.
    ///
    /// The startup manifest is read once at the start, mutated in
    /// memory, and rewritten exactly once (atomically) at the end.
    /// Bundles already listed in a pre-existing manifest whose artifacts
    /// are missing from the repository are staged as well.
    ///
    /// # Errors
    ///
    /// Fatal: unreadable/unwritable manifest, uncreatable repository
    /// directory. Aggregate: [`KeelError::AssemblyIncomplete`] when any
    /// per-artifact staging failed (returned only after the manifest and
    /// every unaffected artifact are durable).
    pub fn assemble(&self, features: &[Feature]) -> Result<AssemblyReport> {
        ensure_dir(&self.config.system_directory)?;
        let mut run = AssemblyRun {
            manifest: StartupManifest::load(&self.config.manifest_path)?,
            attempted: HashSet::new(),
            failures: Vec::new(),
            report: AssemblyReport::default(),
        };

        self.register_features(features, &mut run);
        self.stage_features(features, &mut run);
        self.stage_manifest_entries(&mut run);

        run.manifest.save(&self.config.manifest_path)?;

        if run.failures.is_empty() {
            Ok(run.report)
        } else {
            Err(KeelError::AssemblyIncomplete {
                failures: run.failures,
            }
            .into())
        }
    }

    /// Records every startable bundle in the manifest under the merge
    /// policy (see the module docs).
    fn register_features(&self, features: &[Feature], run: &mut AssemblyRun) {
        for feature in features {
            info!(
                "Installing feature {}/{} into startup manifest",
                feature.name, feature.version
            );
            // Consumed by the first bundle this feature newly inserts.
            let mut comment = Some(vec![
                String::new(),
                format!("# feature: {} version: {}", feature.name, feature.version),
            ]);
            for bundle in &feature.bundles {
                if bundle.dependency {
                    continue;
                }
                let effective = bundle.start_level.unwrap_or(self.config.default_start_level);
                let location = bundle.location.to_mvn();
                if run.manifest.level_of(&location).is_some() {
                    if run.manifest.lower_level(&location, effective) {
                        debug!("Lowered start level of {location} to {effective}");
                        run.report.entries_lowered += 1;
                    }
                } else {
                    run.manifest
                        .insert(&location, effective, comment.take().unwrap_or_default());
                    run.report.entries_added += 1;
                }
            }
        }
    }

    /// Stages every bundle of every feature, dependency bundles
    /// included. Snapshot artifacts get their metadata descriptor on
    /// first copy.
    fn stage_features(&self, features: &[Feature], run: &mut AssemblyRun) {
        for feature in features {
            for bundle in &feature.bundles {
                self.stage(&bundle.location, true, run);
            }
        }
    }

    /// Stages artifacts for manifest entries that predate this run (or
    /// were registered by it) and are missing from the repository.
    /// Opaque, non-coordinate locations are left alone.
    fn stage_manifest_entries(&self, run: &mut AssemblyRun) {
        let locations: Vec<String> = run.manifest.locations().map(String::from).collect();
        for location in locations {
            match Coordinate::parse(&location) {
                Some(coordinate) => self.stage(&coordinate, false, run),
                None => debug!("Manifest entry {location} is not a coordinate, not staging"),
            }
        }
    }

    /// Copies one artifact into the repository layout if absent. A
    /// resolution or copy failure is buffered and staging continues.
    ///
    /// Each coordinate is attempted at most once per run, so a bundle
    /// that is both feature-contributed and manifest-listed neither
    /// double-counts nor buffers its failure twice.
    fn stage(&self, coordinate: &Coordinate, with_metadata: bool, run: &mut AssemblyRun) {
        if !run.attempted.insert(coordinate.clone()) {
            return;
        }
        let target = self.config.system_directory.join(coordinate.repository_path());
        if target.exists() {
            run.report.artifacts_present += 1;
            return;
        }
        let source = match self.artifacts.resolve(coordinate) {
            Ok(source) => source,
            Err(error) => {
                run.failures
                    .push(format!("Could not stage {}: {error:#}", coordinate.to_mvn()));
                return;
            }
        };
        if let Err(error) = copy_artifact(&source, &target) {
            run.failures
                .push(format!("Could not stage {}: {error:#}", coordinate.to_mvn()));
            return;
        }
        debug!("Staged {} to {}", coordinate.to_mvn(), target.display());
        run.report.artifacts_staged += 1;

        if with_metadata && coordinate.is_snapshot() {
            self.write_snapshot_metadata(coordinate, &source, &target);
        }
    }

    /// Copies the snapshot metadata descriptor from beside the source
    /// artifact when one exists, generates it otherwise. Failures here
    /// are warnings only.
    fn write_snapshot_metadata(&self, coordinate: &Coordinate, source: &PathBuf, target: &PathBuf) {
        let metadata_target = match target.parent() {
            Some(parent) => parent.join(SNAPSHOT_METADATA_FILE),
            None => return,
        };
        let metadata_source = source
            .parent()
            .map(|parent| parent.join(SNAPSHOT_METADATA_FILE));

        let result = match metadata_source.filter(|path| path.is_file()) {
            Some(existing) => copy_artifact(&existing, &metadata_target).map(|_| ()),
            None => {
                debug!(
                    "{} is a snapshot, generating {SNAPSHOT_METADATA_FILE}",
                    coordinate.to_mvn()
                );
                generate_snapshot_metadata(coordinate, &metadata_target)
            }
        };
        if let Err(error) = result {
            warn!(
                "Could not write {SNAPSHOT_METADATA_FILE} for {}: {error:#}; \
                 an older remote snapshot may override this one",
                coordinate.to_mvn()
            );
        }
    }
}

/// Accumulated state of one assembly run: the in-memory manifest, the
/// coordinates already attempted, the error buffer, and the report
/// counters. Constructed fresh per run.
struct AssemblyRun {
    manifest: StartupManifest,
    attempted: HashSet<Coordinate>,
    failures: Vec<String>,
    report: AssemblyReport,
}
