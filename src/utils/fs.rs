//! Filesystem helpers: directory creation, atomic writes, artifact
//! copies.
//!
//! The startup manifest and metadata descriptors are written atomically
//! (temp file + rename) so an interrupted run never leaves a partially
//! written file at the target path.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Writes `content` to `path` atomically.
///
/// The content is written to a sibling temp file, synced to disk, and
/// renamed over the target. Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&temp_path).with_context(|| {
            format!(
                "Failed to create temp file: {}\n\n\
                 Check file permissions and that the directory exists",
                temp_path.display()
            )
        })?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().context("Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}

/// Copies `source` to `target`, creating the target's parent directories.
pub fn copy_artifact(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(source, target).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_parents_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b").join("out.properties");

        atomic_write(&target, b"content").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"content");
        assert!(!target.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.properties");
        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"second");
    }

    #[test]
    fn test_copy_artifact_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.jar");
        fs::write(&source, b"bytes").unwrap();

        let target = dir.path().join("repo").join("g").join("a.jar");
        copy_artifact(&source, &target).unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"bytes");
    }
}
