//! Point and range version constraints.
//!
//! A constraint string is classified by its concrete syntax:
//!
//! - a bracketed pair (`[1.0,2.0)`, `(,3.0]`, `[1.0,]`) parses as a
//!   [`VersionConstraint::Range`], with `[`/`]` marking inclusive bounds,
//!   `(`/`)` exclusive ones, and an empty side meaning unbounded
//! - a single bare token (`1.2.0`) parses as a
//!   [`VersionConstraint::Point`]
//! - anything else is a fatal
//!   [`KeelError::InvalidVersionConstraint`](crate::core::KeelError)
//!
//! Rendering always uses the bracketed notation: a point prints as
//! `[v,v]`, a range with the bracket/parenthesis pair matching its
//! inclusivity flags.

use std::fmt;

use anyhow::Result;

use crate::core::KeelError;
use crate::version::Version;

/// A point-or-range version predicate with bound inclusivity.
///
/// # Examples
///
/// ```rust
/// use keel::version::{Version, VersionConstraint};
///
/// # fn example() -> anyhow::Result<()> {
/// let point = VersionConstraint::parse("1.2.0")?;
/// assert!(point.contains(&Version::parse("1.2.0")));
/// assert!(!point.contains(&Version::parse("1.2.1")));
/// assert_eq!(point.to_string(), "[1.2.0,1.2.0]");
///
/// let open_ended = VersionConstraint::parse("[2.0,)")?;
/// assert!(open_ended.contains(&Version::parse("99.0")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Satisfied only by a version equal to this one.
    Point(Version),
    /// Satisfied by versions respecting both bounds; an absent bound
    /// imposes no constraint on that side.
    Range {
        /// Lower bound, unbounded when `None`
        lower: Option<Version>,
        /// Whether a version equal to the lower bound satisfies the range
        lower_inclusive: bool,
        /// Upper bound, unbounded when `None`
        upper: Option<Version>,
        /// Whether a version equal to the upper bound satisfies the range
        upper_inclusive: bool,
    },
}

impl VersionConstraint {
    /// Parses a constraint string, classifying it as point or range by
    /// its concrete syntax.
    ///
    /// # Errors
    ///
    /// Returns [`KeelError::InvalidVersionConstraint`] for any string
    /// matching neither grammar: unbalanced brackets, a range without
    /// exactly one comma, or a bare token containing range punctuation.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || KeelError::InvalidVersionConstraint {
            constraint: input.to_string(),
        };

        if trimmed.starts_with(['[', '(']) {
            let lower_inclusive = trimmed.starts_with('[');
            let upper_inclusive = match trimmed.chars().last() {
                Some(']') => true,
                Some(')') => false,
                _ => return Err(invalid().into()),
            };
            let interior = &trimmed[1..trimmed.len() - 1];
            let (lower, upper) = interior.split_once(',').ok_or_else(invalid)?;
            if upper.contains(',') {
                return Err(invalid().into());
            }
            let parse_bound = |bound: &str| {
                let bound = bound.trim();
                (!bound.is_empty()).then(|| Version::parse(bound))
            };
            return Ok(Self::Range {
                lower: parse_bound(lower),
                lower_inclusive,
                upper: parse_bound(upper),
                upper_inclusive,
            });
        }

        // A bare point token: no range punctuation, no whitespace, non-empty.
        if trimmed.is_empty()
            || trimmed.contains([',', '[', ']', '(', ')'])
            || trimmed.contains(char::is_whitespace)
        {
            return Err(invalid().into());
        }
        Ok(Self::Point(Version::parse(trimmed)))
    }

    /// Whether `version` satisfies this constraint.
    pub fn contains(&self, version: &Version) -> bool {
        match self {
            Self::Point(point) => version == point,
            Self::Range {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                let above_lower = match lower {
                    Some(bound) if *lower_inclusive => version >= bound,
                    Some(bound) => version > bound,
                    None => true,
                };
                let below_upper = match upper {
                    Some(bound) if *upper_inclusive => version <= bound,
                    Some(bound) => version < bound,
                    None => true,
                };
                above_lower && below_upper
            }
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(version) => write!(f, "[{version},{version}]"),
            Self::Range {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                let open = if *lower_inclusive { '[' } else { '(' };
                let close = if *upper_inclusive { ']' } else { ')' };
                let lower = lower.as_ref().map(Version::as_str).unwrap_or_default();
                let upper = upper.as_ref().map(Version::as_str).unwrap_or_default();
                write!(f, "{open}{lower},{upper}{close}")
            }
        }
    }
}
