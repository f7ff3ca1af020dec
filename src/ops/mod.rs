//! Flat per-range operations and the precedence resolver.

/// Composition with priority ordering and last-write-wins de-duplication.
pub mod compose;
/// Operation kinds and the flat operation set.
pub mod flat;
