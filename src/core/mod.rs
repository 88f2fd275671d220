//! Core types shared across the keel crate.
//!
//! This module hosts the crate error enum. All fallible operations in keel
//! return [`anyhow::Result`] with a [`KeelError`] at the root where the
//! failure mode is one the crate itself defines, so callers can match on
//! the error kind while still getting contextual messages.

pub mod error;

pub use error::KeelError;
