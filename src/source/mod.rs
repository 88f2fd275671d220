//! Collaborator contract for resolving artifacts to local files.
//!
//! Network retrieval is outside this crate: the assembler asks an
//! [`ArtifactResolver`] for the local file backing a coordinate and
//! treats a failure there as isolated to that one artifact (it lands in
//! the staging error buffer, never crashes the run). A resolver backed by
//! a remote transport, a cache, or anything else plugs in through this
//! trait.
//!
//! [`LocalRepositoryResolver`] is the provided implementation for the
//! offline case: it resolves against an on-disk repository tree laid out
//! by [`Coordinate::repository_path`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::core::KeelError;

/// Maps a coordinate to a local artifact file.
///
/// Resolution is a blocking call with no retry or timeout defined here;
/// transports that need either implement them behind this trait.
pub trait ArtifactResolver {
    /// The local file holding the artifact for `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns an error when the artifact cannot be produced; the caller
    /// isolates the failure to this one artifact.
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf>;
}

/// Resolves artifacts from an on-disk repository layout.
#[derive(Debug, Clone)]
pub struct LocalRepositoryResolver {
    root: PathBuf,
}

impl LocalRepositoryResolver {
    /// Creates a resolver rooted at `root` (e.g. a local cache
    /// repository).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The repository root this resolver reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactResolver for LocalRepositoryResolver {
    fn resolve(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let path = self.root.join(coordinate.repository_path());
        debug!("Resolving artifact {coordinate} against {}", self.root.display());
        if path.is_file() {
            debug!("Resolved artifact {coordinate} to {}", path.display());
            Ok(path)
        } else {
            Err(KeelError::ArtifactNotFound {
                coordinate: coordinate.to_canonical(),
            }
            .into())
        }
    }
}
