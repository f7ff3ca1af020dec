//! Boundary with the external codec engine.
//!
//! Nothing here encodes video. Projects are validated, settings normalized and a
//! [`job::RenderJob`] handed to a [`job::CodecEngine`].

/// Structural analysis of a project's timeline chain.
pub mod analyze;
/// Job assembly and the codec engine contract.
pub mod job;
/// Render settings and their normalization.
pub mod settings;
