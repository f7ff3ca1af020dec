//! Shared primitives: frame ranges, timing helpers and the error taxonomy.

/// Frame ranges and rate helpers.
pub mod core;
/// Error and result types.
pub mod error;
