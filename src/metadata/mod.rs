//! Snapshot repository-metadata descriptors.
//!
//! A staged snapshot artifact gets a sibling metadata descriptor
//! recording its group, artifact, version, last-updated timestamp, and
//! local-copy snapshot flag. Without it, later repository resolution
//! could override the staged snapshot with an older one found remotely.
//!
//! The descriptor format is a small fixed XML template, generated here
//! when the source repository does not already provide one to copy.

use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use crate::coordinate::Coordinate;
use crate::utils::fs::atomic_write;

/// Generates a snapshot metadata descriptor for `artifact` at `target`.
///
/// The timestamp is the current UTC time in `yyyyMMddHHmmss` form, the
/// format repository tooling expects in `lastUpdated` fields.
pub fn generate_snapshot_metadata(artifact: &Coordinate, target: &Path) -> Result<()> {
    let stamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
    atomic_write(target, render(artifact, &stamp).as_bytes())
}

fn render(artifact: &Coordinate, stamp: &str) -> String {
    let classifier = artifact
        .classifier
        .as_ref()
        .map(|c| format!("        <classifier>{c}</classifier>\n"))
        .unwrap_or_default();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <metadata modelVersion=\"1.1.0\">\n\
         \x20 <groupId>{group}</groupId>\n\
         \x20 <artifactId>{artifact_id}</artifactId>\n\
         \x20 <version>{version}</version>\n\
         \x20 <versioning>\n\
         \x20   <snapshot>\n\
         \x20     <localCopy>true</localCopy>\n\
         \x20   </snapshot>\n\
         \x20   <lastUpdated>{stamp}</lastUpdated>\n\
         \x20   <snapshotVersions>\n\
         \x20     <snapshotVersion>\n\
         {classifier}\
         \x20       <extension>{extension}</extension>\n\
         \x20       <value>{version}</value>\n\
         \x20       <updated>{stamp}</updated>\n\
         \x20     </snapshotVersion>\n\
         \x20   </snapshotVersions>\n\
         \x20 </versioning>\n\
         </metadata>\n",
        group = artifact.group,
        artifact_id = artifact.artifact,
        version = artifact.version,
        extension = artifact.extension,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_descriptor_records_identity_and_snapshot_flag() {
        let artifact = Coordinate::new("org.example", "foo", "1.0-SNAPSHOT");
        let rendered = render(&artifact, "20240115103000");

        assert!(rendered.contains("<groupId>org.example</groupId>"));
        assert!(rendered.contains("<artifactId>foo</artifactId>"));
        assert!(rendered.contains("<version>1.0-SNAPSHOT</version>"));
        assert!(rendered.contains("<localCopy>true</localCopy>"));
        assert!(rendered.contains("<lastUpdated>20240115103000</lastUpdated>"));
        assert!(rendered.contains("<extension>jar</extension>"));
        assert!(!rendered.contains("<classifier>"));
    }

    #[test]
    fn test_classifier_is_included_when_present() {
        let artifact = Coordinate::new("g", "a", "1.0-SNAPSHOT").with_classifier("features");
        let rendered = render(&artifact, "20240115103000");
        assert!(rendered.contains("<classifier>features</classifier>"));
    }

    #[test]
    fn test_generate_writes_descriptor_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("maven-metadata-local.xml");
        let artifact = Coordinate::new("g", "a", "2.0-SNAPSHOT");

        generate_snapshot_metadata(&artifact, &target).unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.contains("<version>2.0-SNAPSHOT</version>"));
    }
}
