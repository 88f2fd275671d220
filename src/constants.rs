//! Global constants used throughout the keel codebase.
//!
//! This module contains the fixed values shared by the assembler and
//! manifest layers. Defining them centrally keeps the assembly defaults
//! discoverable and consistent with the startup-manifest file format.

/// Default start level for bundles whose feature does not specify one.
///
/// Bundles with lower start levels are activated earlier. The merge policy
/// in the assembler only ever lowers a level, never raises it, so this is
/// the latest any unannotated bundle will start.
pub const DEFAULT_START_LEVEL: u32 = 30;

/// Header comment written once when a startup manifest is first created.
pub const MANIFEST_HEADER: &str = "# Bundles to be started on startup, with startlevel";

/// File name of the snapshot metadata descriptor written next to a staged
/// snapshot artifact.
///
/// The local descriptor prevents an older remote snapshot from overriding
/// the staged one during later repository resolution.
pub const SNAPSHOT_METADATA_FILE: &str = "maven-metadata-local.xml";

/// Artifact extension assumed when a coordinate omits its type.
pub const DEFAULT_EXTENSION: &str = "jar";
