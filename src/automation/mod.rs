//! Parameter automation.

/// Curves, sampling and declared parameter ranges.
pub mod curve;
