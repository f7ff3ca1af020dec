//! Scoped operation graphs and their copy-on-write editing API.

/// Scope identifiers and canonical keys.
pub mod scope;
/// Graph store, nodes and edit helpers.
pub mod store;
