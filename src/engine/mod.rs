//! Structural frame engine.
//!
//! Graphs become a [`pipeline::Pipeline`] through [`adapter::build_pipeline`], and the
//! pipeline runs over a synthetic [`structural::StructuralStream`] in [`transform`].

/// Graph store to pipeline translation.
pub mod adapter;
/// Execution-ready pipeline types and typed parameters.
pub mod pipeline;
/// Synthetic I/P/B frame sequences.
pub mod structural;
/// Stream transforms.
pub mod transform;
