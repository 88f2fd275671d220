//! Version ordering and constraint handling for feature dependencies.
//!
//! Feature versions use multi-component ordering rather than strict semver:
//! numeric components compare as integers, qualifier components compare
//! lexically, and missing trailing components are treated as zero, so
//! `1.2` equals `1.2.0` and `1.0` orders after `1.0-alpha`. This is what
//! the descriptor ecosystem produces and what `semver` cannot express
//! (neither the ordering nor `[a,b)` range syntax), so the crate carries
//! its own [`Version`] type.
//!
//! Constraints come in two shapes:
//! - **Point**: a single version token, satisfied only by an equal version
//! - **Range**: a bracketed pair with per-bound inclusivity, where an
//!   absent bound imposes no constraint on that side
//!
//! ```rust
//! use keel::version::{Version, VersionConstraint};
//!
//! # fn example() -> anyhow::Result<()> {
//! let range = VersionConstraint::parse("[1.0,2.0)")?;
//! assert!(range.contains(&Version::parse("1.0")));
//! assert!(range.contains(&Version::parse("1.9.9")));
//! assert!(!range.contains(&Version::parse("2.0")));
//! # Ok(())
//! # }
//! ```

pub mod constraints;
pub mod ordering;

pub use constraints::VersionConstraint;
pub use ordering::Version;
