//! Artifact coordinates and the conversions among their three notations.
//!
//! An artifact identity is the `(group, artifact, version, extension,
//! classifier)` tuple, written in any of three forms:
//!
//! - **mvn URL form**: `mvn:group/artifact/version[/type[/classifier]]`
//! - **canonical form**: `group:artifact[:type[:classifier]]:version`
//! - **repository path**: `group-with-dots-as-slashes/artifact/baseVersion/`
//!   `artifact-baseVersion[-classifier].type`
//!
//! # Defaulting rules
//!
//! When a classifier is present but the type is absent, the type defaults
//! to `jar` and is emitted explicitly. When the type is `jar` and there is
//! no classifier, the type is omitted entirely from the rendered forms.
//!
//! # Lenient passthrough
//!
//! The string-to-string conversion functions ([`mvn_to_canonical`],
//! [`canonical_to_mvn`], [`path_from_mvn`], [`path_from_canonical`]) return
//! their input *unchanged* when it does not match the expected grammar.
//! Callers rely on non-coordinate strings (plain paths, opaque URLs)
//! flowing through these conversions untouched, so this permissiveness is
//! part of the contract, not an oversight. Use [`Coordinate::parse_mvn`] /
//! [`Coordinate::parse_canonical`] when a failed parse must be observable.
//!
//! # Snapshot versions
//!
//! A version may carry a resolved snapshot timestamp
//! (`1.0-20240115.103000-1`). The repository path is always derived from
//! the *base* version (`1.0-SNAPSHOT`); the full version is retained on
//! the coordinate for metadata purposes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::DEFAULT_EXTENSION;

/// Canonical form grammar: `group:artifact[:type[:classifier]]:version`.
static CANONICAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^: ]+):([^: ]+)(?::([^: ]*)(?::([^: ]+))?)?:([^: ]+)$")
        .expect("canonical coordinate regex is valid")
});

/// mvn URL form grammar: `mvn:group/artifact/version[/type[/classifier]]`.
static MVN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mvn:([^/ ]+)/([^/ ]+)/([^/ ]+)(?:/([^/ ]+)(?:/([^/ ]+))?)?$")
        .expect("mvn coordinate regex is valid")
});

/// Resolved snapshot version: `base-yyyyMMdd.HHmmss-buildNumber`.
static SNAPSHOT_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)-(\d{8}\.\d{6})-(\d+)$").expect("snapshot timestamp regex is valid")
});

/// Suffix marking an unresolved snapshot version.
const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// The `(group, artifact, version, extension, classifier)` identity of an
/// artifact.
///
/// Identity and equality are over all five fields. The [`fmt::Display`]
/// implementation renders the canonical form with the jar-omission rule
/// applied.
///
/// # Examples
///
/// ```rust
/// use keel::coordinate::Coordinate;
///
/// let coord = Coordinate::parse_canonical("org.example:foo:1.0").unwrap();
/// assert_eq!(coord.extension, "jar"); // defaulted
/// assert_eq!(coord.to_mvn(), "mvn:org.example/foo/1.0");
/// assert_eq!(coord.repository_path(), "org/example/foo/1.0/foo-1.0.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Group identifier, dotted (e.g. `org.example`)
    pub group: String,
    /// Artifact identifier
    pub artifact: String,
    /// Full version, including a resolved snapshot timestamp when present
    pub version: String,
    /// Artifact type / file extension (`jar` when defaulted)
    pub extension: String,
    /// Optional classifier distinguishing secondary artifacts
    pub classifier: Option<String>,
}

impl Coordinate {
    /// Creates a coordinate with the default `jar` extension and no
    /// classifier.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            classifier: None,
        }
    }

    /// Replaces the extension, consuming and returning the coordinate.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the classifier, consuming and returning the coordinate.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Parses the canonical form `group:artifact[:type[:classifier]]:version`.
    ///
    /// Returns `None` when the input does not match the grammar. An absent
    /// or empty type defaults to `jar`.
    pub fn parse_canonical(input: &str) -> Option<Self> {
        let caps = CANONICAL_RE.captures(input)?;
        let extension = match caps.get(3).map(|m| m.as_str()) {
            Some(ext) if !ext.is_empty() => ext.to_string(),
            _ => DEFAULT_EXTENSION.to_string(),
        };
        Some(Self {
            group: caps[1].to_string(),
            artifact: caps[2].to_string(),
            version: caps[5].to_string(),
            extension,
            classifier: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// Parses the mvn URL form `mvn:group/artifact/version[/type[/classifier]]`.
    ///
    /// Returns `None` when the input does not match the grammar. An absent
    /// type defaults to `jar`.
    pub fn parse_mvn(input: &str) -> Option<Self> {
        let caps = MVN_RE.captures(input)?;
        let extension = match caps.get(4).map(|m| m.as_str()) {
            Some(ext) if !ext.is_empty() => ext.to_string(),
            _ => DEFAULT_EXTENSION.to_string(),
        };
        Some(Self {
            group: caps[1].to_string(),
            artifact: caps[2].to_string(),
            version: caps[3].to_string(),
            extension,
            classifier: caps.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Parses either notation, trying the mvn URL form first.
    pub fn parse(input: &str) -> Option<Self> {
        Self::parse_mvn(input).or_else(|| Self::parse_canonical(input))
    }

    /// Renders the canonical form.
    ///
    /// A `jar` type with no classifier is omitted entirely; when a
    /// classifier is present the type is always emitted, even if `jar`.
    pub fn to_canonical(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}:{}:{}:{}:{}",
                self.group, self.artifact, self.extension, classifier, self.version
            ),
            None if self.extension == DEFAULT_EXTENSION => {
                format!("{}:{}:{}", self.group, self.artifact, self.version)
            }
            None => format!(
                "{}:{}:{}:{}",
                self.group, self.artifact, self.extension, self.version
            ),
        }
    }

    /// Renders the mvn URL form, applying the same jar-omission rule as
    /// [`to_canonical`](Self::to_canonical).
    pub fn to_mvn(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "mvn:{}/{}/{}/{}/{}",
                self.group, self.artifact, self.version, self.extension, classifier
            ),
            None if self.extension == DEFAULT_EXTENSION => {
                format!("mvn:{}/{}/{}", self.group, self.artifact, self.version)
            }
            None => format!(
                "mvn:{}/{}/{}/{}",
                self.group, self.artifact, self.version, self.extension
            ),
        }
    }

    /// The version with any resolved snapshot timestamp stripped back to
    /// its `-SNAPSHOT` base (`1.0-20240115.103000-1` becomes
    /// `1.0-SNAPSHOT`). Non-snapshot versions are returned as-is.
    pub fn base_version(&self) -> String {
        match SNAPSHOT_TIMESTAMP_RE.captures(&self.version) {
            Some(caps) => format!("{}{}", &caps[1], SNAPSHOT_SUFFIX),
            None => self.version.clone(),
        }
    }

    /// Whether this coordinate refers to a snapshot, either unresolved
    /// (`-SNAPSHOT`) or resolved to a timestamped build.
    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with(SNAPSHOT_SUFFIX) || SNAPSHOT_TIMESTAMP_RE.is_match(&self.version)
    }

    /// The repository-layout file name:
    /// `artifact-baseVersion[-classifier].type`.
    pub fn file_name(&self) -> String {
        let classifier = self
            .classifier
            .as_ref()
            .map(|c| format!("-{c}"))
            .unwrap_or_default();
        format!(
            "{}-{}{}.{}",
            self.artifact,
            self.base_version(),
            classifier,
            self.extension
        )
    }

    /// The relative repository path for this artifact, derived from the
    /// base version:
    /// `group-with-dots-as-slashes/artifact/baseVersion/fileName`.
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.base_version(),
            self.file_name()
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

/// Converts an mvn URL into the canonical form, returning the input
/// unchanged when it does not match the mvn grammar.
pub fn mvn_to_canonical(input: &str) -> String {
    match Coordinate::parse_mvn(input) {
        Some(coord) => coord.to_canonical(),
        None => input.to_string(),
    }
}

/// Converts a canonical coordinate into the mvn URL form, returning the
/// input unchanged when it does not match the canonical grammar.
pub fn canonical_to_mvn(input: &str) -> String {
    match Coordinate::parse_canonical(input) {
        Some(coord) => coord.to_mvn(),
        None => input.to_string(),
    }
}

/// Derives the repository path for an mvn URL.
///
/// Strings containing no `:` at all (plain paths) and strings that fail
/// the mvn grammar are returned unchanged.
pub fn path_from_mvn(input: &str) -> String {
    if !input.contains(':') {
        return input.to_string();
    }
    match Coordinate::parse_mvn(input) {
        Some(coord) => coord.repository_path(),
        None => input.to_string(),
    }
}

/// Derives the repository path for a canonical coordinate, returning the
/// input unchanged when it does not match the canonical grammar.
pub fn path_from_canonical(input: &str) -> String {
    match Coordinate::parse_canonical(input) {
        Some(coord) => coord.repository_path(),
        None => input.to_string(),
    }
}
