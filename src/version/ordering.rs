//! Multi-component version type with ecosystem-standard ordering.
//!
//! Versions are tokenized on `.` and `-` into numeric and qualifier
//! components. Comparison walks the components pairwise:
//!
//! - numeric vs numeric: integer comparison
//! - qualifier vs qualifier: lexical comparison
//! - numeric vs qualifier: the numeric component orders *after* the
//!   qualifier (a release outranks its pre-release qualifiers)
//! - a missing trailing component is treated as numeric zero, so `1.2`
//!   equals `1.2.0` and `1.0` orders after `1.0-alpha`
//!
//! Equality is ordering-equality, not string equality: `1.2` and `1.2.0`
//! are the same version. The original input string is retained for
//! display.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One tokenized version component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Component {
    Numeric(u64),
    Qualifier(String),
}

impl Component {
    fn zero() -> Self {
        Self::Numeric(0)
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Qualifier(a), Self::Qualifier(b)) => a.cmp(b),
            // A numeric component outranks any qualifier at the same
            // position: 1.0 > 1.0-alpha.
            (Self::Numeric(_), Self::Qualifier(_)) => Ordering::Greater,
            (Self::Qualifier(_), Self::Numeric(_)) => Ordering::Less,
        }
    }
}

/// A parsed version with multi-component ordering.
///
/// Parsing is infallible: any string tokenizes into components, and a
/// token that is not a non-negative integer is a qualifier. The empty
/// string parses as version zero.
///
/// # Examples
///
/// ```rust
/// use keel::version::Version;
///
/// assert_eq!(Version::parse("1.2"), Version::parse("1.2.0"));
/// assert!(Version::parse("1.10") > Version::parse("1.9"));
/// assert!(Version::parse("1.0") > Version::parse("1.0-alpha"));
/// assert!(Version::parse("1.0-alpha") < Version::parse("1.0-beta"));
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

impl Version {
    /// Parses a version string. Never fails; see the type-level docs for
    /// the tokenization rules.
    pub fn parse(input: &str) -> Self {
        let components = input
            .split(['.', '-'])
            .filter(|token| !token.is_empty())
            .map(|token| match token.parse::<u64>() {
                Ok(value) => Component::Numeric(value),
                Err(_) => Component::Qualifier(token.to_string()),
            })
            .collect();
        Self {
            raw: input.to_string(),
            components,
        }
    }

    /// The original string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Components with trailing zeros stripped, the canonical shape used
    /// for equality and hashing.
    fn normalized(&self) -> &[Component] {
        let mut len = self.components.len();
        while len > 0 && self.components[len - 1] == Component::zero() {
            len -= 1;
        }
        &self.components[..len]
    }
}

impl From<&str> for Version {
    fn from(input: &str) -> Self {
        Self::parse(input)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        let zero = Component::zero();
        for i in 0..len {
            let a = self.components.get(i).unwrap_or(&zero);
            let b = other.components.get(i).unwrap_or(&zero);
            match a.compare(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn v(s: &str) -> Version {
        Version::parse(s)
    }

    #[test]
    fn test_numeric_components_compare_as_integers() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("2.0") > v("1.99.99"));
        assert!(v("10.0") > v("9.0"));
    }

    #[test]
    fn test_missing_trailing_components_are_zero() {
        assert_eq!(v("1.2"), v("1.2.0"));
        assert_eq!(v("1"), v("1.0.0"));
        assert!(v("1.2.1") > v("1.2"));
    }

    #[test]
    fn test_qualifiers_compare_lexically() {
        assert!(v("1.0-alpha") < v("1.0-beta"));
        assert!(v("1.0.0.A") < v("1.0.0.B"));
    }

    #[test]
    fn test_release_orders_after_qualified() {
        assert!(v("1.0") > v("1.0-alpha"));
        assert!(v("1.0-SNAPSHOT") < v("1.0"));
        assert!(v("1.0.1") > v("1.0-rc1"));
    }

    #[test]
    fn test_equal_versions_hash_identically() {
        let hash = |version: &Version| {
            let mut hasher = DefaultHasher::new();
            version.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&v("1.2")), hash(&v("1.2.0")));
    }

    #[test]
    fn test_display_preserves_input() {
        assert_eq!(v("1.2.0").to_string(), "1.2.0");
        assert_eq!(v("1.0-SNAPSHOT").to_string(), "1.0-SNAPSHOT");
    }

    #[test]
    fn test_empty_string_is_version_zero() {
        assert_eq!(v(""), v("0"));
    }
}
