//! Persisted project model.

/// Project, timeline, sources and masks.
pub mod model;
