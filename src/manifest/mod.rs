//! The startup manifest: an ordered, comment-preserving map from bundle
//! location to start level.
//!
//! The manifest is a line-oriented file of `coordinate = startLevel`
//! entries. Comment and blank lines bind to the entry they immediately
//! precede and are rewritten verbatim; lines after the last entry are
//! preserved as trailing content. A fixed header comment is written once
//! when the file is first created.
//!
//! The structure is owned here in full - parse and serialize are exact
//! inverses, so a load/save cycle is byte-identical. Insertion order is
//! preserved and semantically meaningful: comments are anchored to the
//! entry they precede, and the file is read fully at the start of a run
//! and written fully, atomically, at the end.
//!
//! Entries are looked up *structurally*: a probe location and an entry
//! location match when both parse as coordinates and the coordinates are
//! equal (so the mvn URL and canonical notations of one artifact hit the
//! same entry), falling back to string equality for opaque locations.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::constants::MANIFEST_HEADER;
use crate::coordinate::Coordinate;
use crate::core::KeelError;
use crate::utils::fs::atomic_write;

/// One `location = startLevel` line with the comment block anchored to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Bundle location exactly as written in the file
    pub location: String,
    /// Start level for this bundle
    pub start_level: u32,
    /// Comment and blank lines immediately preceding the entry, verbatim
    pub leading_comments: Vec<String>,
}

/// Ordered, comment-preserving startup manifest.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use keel::manifest::StartupManifest;
///
/// # fn example() -> anyhow::Result<()> {
/// let mut manifest = StartupManifest::load(Path::new("etc/startup.properties"))?;
/// if manifest.level_of("mvn:org.example/boot/1.0").is_none() {
///     manifest.insert("mvn:org.example/boot/1.0", 10, Vec::new());
/// }
/// manifest.save(Path::new("etc/startup.properties"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupManifest {
    /// Lines emitted before the first entry on a freshly created
    /// manifest. After a load/save cycle these travel as the first
    /// entry's leading comments instead; serialization is unaffected.
    header: Vec<String>,
    entries: Vec<ManifestEntry>,
    /// Lines after the last entry, verbatim
    trailing: Vec<String>,
}

impl StartupManifest {
    /// Creates a fresh manifest carrying the fixed creation header.
    pub fn new() -> Self {
        Self {
            header: vec![MANIFEST_HEADER.to_string()],
            entries: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Loads the manifest at `path`, or returns a fresh one (with the
    /// creation header) when the file does not exist.
    ///
    /// # Errors
    ///
    /// Unreadable files and lines that are neither comments nor
    /// `location = level` entries are fatal - rewriting a manifest that
    /// was not fully understood would lose entries.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No startup manifest at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read startup manifest: {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Parses manifest content. `path` is used for error reporting only.
    fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut entries = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                pending.push(line.to_string());
                continue;
            }
            let Some((location, level)) = line.split_once('=') else {
                return Err(KeelError::ManifestParseError {
                    file: path.display().to_string(),
                    reason: format!("line {}: expected 'location = startLevel', got {line:?}", index + 1),
                }
                .into());
            };
            let start_level: u32 = level.trim().parse().map_err(|_| {
                KeelError::ManifestParseError {
                    file: path.display().to_string(),
                    reason: format!("line {}: start level {:?} is not an integer", index + 1, level.trim()),
                }
            })?;
            entries.push(ManifestEntry {
                location: location.trim().to_string(),
                start_level,
                leading_comments: std::mem::take(&mut pending),
            });
        }

        Ok(Self {
            header: Vec::new(),
            entries,
            trailing: pending,
        })
    }

    /// Serializes the manifest to its file form.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(line);
            out.push('\n');
        }
        for entry in &self.entries {
            for line in &entry.leading_comments {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&format!("{} = {}\n", entry.location, entry.start_level));
        }
        for line in &self.trailing {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Writes the manifest atomically (temp file + rename), creating
    /// parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        atomic_write(path, self.serialize().as_bytes())
            .with_context(|| format!("Cannot write startup manifest: {}", path.display()))?;
        debug!("Wrote startup manifest with {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// The start level recorded for `location`, matched structurally.
    pub fn level_of(&self, location: &str) -> Option<u32> {
        self.find(location).map(|entry| entry.start_level)
    }

    /// Lowers the entry for `location` to `level` if one exists at a
    /// higher level. Returns `true` when the entry was changed.
    pub fn lower_level(&mut self, location: &str, level: u32) -> bool {
        let probe = Coordinate::parse(location);
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| locations_match(&entry.location, location, probe.as_ref()))
        else {
            return false;
        };
        if level < entry.start_level {
            entry.start_level = level;
            true
        } else {
            false
        }
    }

    /// Appends a new entry with its leading comment block.
    ///
    /// The manifest never holds two entries for one coordinate: when a
    /// structurally matching entry already exists, this degrades to
    /// [`lower_level`](Self::lower_level) and the comments are discarded.
    pub fn insert(&mut self, location: &str, level: u32, leading_comments: Vec<String>) {
        if self.find(location).is_some() {
            self.lower_level(location, level);
            return;
        }
        self.entries.push(ManifestEntry {
            location: location.to_string(),
            start_level: level,
            leading_comments,
        });
    }

    /// All entries, in file order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Iterates entry locations, in file order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.location.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, location: &str) -> Option<&ManifestEntry> {
        let probe = Coordinate::parse(location);
        self.entries
            .iter()
            .find(|entry| locations_match(&entry.location, location, probe.as_ref()))
    }
}

/// Structural location comparison: coordinates when both sides parse,
/// string equality otherwise.
fn locations_match(entry: &str, probe_raw: &str, probe: Option<&Coordinate>) -> bool {
    if let (Some(probe), Some(entry)) = (probe, Coordinate::parse(entry)) {
        return entry == *probe;
    }
    entry == probe_raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_manifest_serializes_header_once() {
        let mut manifest = StartupManifest::new();
        manifest.insert("mvn:org.example/boot/1.0", 10, Vec::new());
        assert_eq!(
            manifest.serialize(),
            "# Bundles to be started on startup, with startlevel\n\
             mvn:org.example/boot/1.0 = 10\n"
        );
    }

    #[test]
    fn test_parse_serialize_round_trip_is_byte_identical() {
        let content = "# Bundles to be started on startup, with startlevel\n\
                       mvn:org.example/boot/1.0 = 10\n\
                       \n\
                       # feature: web version: 2.0\n\
                       mvn:org.example/web/2.0 = 30\n\
                       # trailing note\n";
        let manifest = StartupManifest::parse(content, Path::new("test")).unwrap();
        assert_eq!(manifest.serialize(), content);

        // The header line travels as the first entry's leading comment.
        assert_eq!(manifest.entries()[0].leading_comments.len(), 1);
        assert_eq!(manifest.entries()[1].leading_comments.len(), 2);
        assert_eq!(manifest.trailing, vec!["# trailing note".to_string()]);
    }

    #[test]
    fn test_comments_anchor_to_following_entry() {
        let content = "# about a\na:b:1.0 = 20\n# about c\nc:d:2.0 = 40\n";
        let manifest = StartupManifest::parse(content, Path::new("test")).unwrap();
        assert_eq!(manifest.entries()[0].leading_comments, vec!["# about a"]);
        assert_eq!(manifest.entries()[1].leading_comments, vec!["# about c"]);
    }

    #[test]
    fn test_structural_lookup_across_notations() {
        let mut manifest = StartupManifest::new();
        manifest.insert("mvn:org.example/foo/1.0", 30, Vec::new());

        // Canonical notation of the same artifact hits the same entry.
        assert_eq!(manifest.level_of("org.example:foo:1.0"), Some(30));
        assert!(manifest.lower_level("org.example:foo:1.0", 20));
        assert_eq!(manifest.level_of("mvn:org.example/foo/1.0"), Some(20));
    }

    #[test]
    fn test_opaque_locations_compare_by_string() {
        let mut manifest = StartupManifest::new();
        manifest.insert("lib/custom-launcher.jar", 5, Vec::new());
        assert_eq!(manifest.level_of("lib/custom-launcher.jar"), Some(5));
        assert_eq!(manifest.level_of("lib/other.jar"), None);
    }

    #[test]
    fn test_lower_level_never_raises() {
        let mut manifest = StartupManifest::new();
        manifest.insert("g:a:1.0", 20, Vec::new());
        assert!(!manifest.lower_level("g:a:1.0", 40));
        assert_eq!(manifest.level_of("g:a:1.0"), Some(20));
        assert!(manifest.lower_level("g:a:1.0", 10));
        assert_eq!(manifest.level_of("g:a:1.0"), Some(10));
    }

    #[test]
    fn test_duplicate_insert_degrades_to_merge() {
        let mut manifest = StartupManifest::new();
        manifest.insert("g:a:1.0", 40, vec!["# first".to_string()]);
        manifest.insert("mvn:g/a/1.0", 20, vec!["# second".to_string()]);
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.level_of("g:a:1.0"), Some(20));
        assert_eq!(manifest.entries()[0].leading_comments, vec!["# first"]);
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let err = StartupManifest::parse("not an entry\n", Path::new("bad.properties")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KeelError>(),
            Some(KeelError::ManifestParseError { .. })
        ));
    }

    #[test]
    fn test_malformed_level_is_fatal() {
        let err =
            StartupManifest::parse("g:a:1.0 = soon\n", Path::new("bad.properties")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KeelError>(),
            Some(KeelError::ManifestParseError { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = StartupManifest::load(&dir.path().join("absent.properties")).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.serialize(), format!("{MANIFEST_HEADER}\n"));
    }

    #[test]
    fn test_save_load_cycle_preserves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etc").join("startup.properties");

        let mut manifest = StartupManifest::new();
        manifest.insert(
            "mvn:org.example/boot/1.0",
            10,
            vec![String::new(), "# feature: boot version: 1.0".to_string()],
        );
        manifest.save(&path).unwrap();

        let first = std::fs::read_to_string(&path).unwrap();
        StartupManifest::load(&path).unwrap().save(&path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }
}
