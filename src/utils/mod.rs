//! Shared utilities for filesystem operations.

pub mod fs;
