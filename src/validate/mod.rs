//! Project validation with accumulated, path-addressed diagnostics.

/// Diagnostic and report types.
pub mod diagnostic;
/// Project checks.
pub mod project;
