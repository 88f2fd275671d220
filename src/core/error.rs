//! Error handling for keel.
//!
//! The error system distinguishes two propagation styles, mirroring the
//! assembly run's failure policy:
//!
//! 1. **Fatal, structural errors** abort immediately: a malformed version
//!    constraint at construction time, or a startup manifest that cannot be
//!    read or written. Continuing past these would leave downstream state
//!    undefined.
//! 2. **Per-artifact staging failures** are accumulated while the rest of
//!    the batch completes, then surfaced as a single aggregate
//!    [`KeelError::AssemblyIncomplete`] after the manifest has been
//!    persisted. Completed side effects are never rolled back.
//!
//! A dependency that names an absent feature is deliberately *not* an
//! error in either category; the resolver drops it silently (see
//! [`crate::resolver`]).
//!
//! # Examples
//!
//! ```rust
//! use keel::core::KeelError;
//! use keel::version::VersionConstraint;
//!
//! let err = VersionConstraint::parse("[1.0,2.0,3.0]").unwrap_err();
//! match err.downcast_ref::<KeelError>() {
//!     Some(KeelError::InvalidVersionConstraint { constraint }) => {
//!         assert_eq!(constraint, "[1.0,2.0,3.0]");
//!     }
//!     _ => panic!("expected InvalidVersionConstraint"),
//! }
//! ```

use thiserror::Error;

/// The main error type for keel operations.
///
/// Each variant represents a specific failure mode with enough context to
/// report the problem without re-deriving it at the call site.
#[derive(Error, Debug)]
pub enum KeelError {
    /// Version constraint string matched neither the point nor the range
    /// grammar.
    ///
    /// Raised at construction time and always fatal: a constraint that
    /// cannot be classified cannot participate in dependency identity.
    #[error("Invalid version constraint: {constraint}")]
    InvalidVersionConstraint {
        /// The constraint string that failed to parse
        constraint: String,
    },

    /// Startup manifest contains a line that is neither a comment nor a
    /// `coordinate = startLevel` entry.
    ///
    /// Fatal: rewriting a manifest we could not fully parse would lose
    /// entries.
    #[error("Invalid startup manifest syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// One or more artifacts could not be staged into the repository.
    ///
    /// Returned once, after the startup manifest has been persisted and
    /// every unaffected artifact has been staged. The `failures` list
    /// holds one message per failed artifact, in processing order.
    #[error("Could not stage {} artifact(s):\n{}", .failures.len(), .failures.join("\n"))]
    AssemblyIncomplete {
        /// One message per artifact that failed to stage
        failures: Vec<String>,
    },

    /// Artifact could not be resolved to a local file.
    #[error("Could not resolve artifact {coordinate}")]
    ArtifactNotFound {
        /// Canonical form of the coordinate that failed to resolve
        coordinate: String,
    },

    /// Standard I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_incomplete_display_lists_every_failure() {
        let err = KeelError::AssemblyIncomplete {
            failures: vec![
                "Could not stage mvn:org.example/a/1.0: no such file".to_string(),
                "Could not stage mvn:org.example/b/2.0: permission denied".to_string(),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("Could not stage 2 artifact(s):"));
        assert!(rendered.contains("org.example/a/1.0"));
        assert!(rendered.contains("org.example/b/2.0"));
    }

    #[test]
    fn test_manifest_parse_error_names_file() {
        let err = KeelError::ManifestParseError {
            file: "etc/startup.properties".to_string(),
            reason: "line 3: missing '='".to_string(),
        };
        assert!(err.to_string().contains("etc/startup.properties"));
    }
}
