//! Moshflow is the structural core of a datamosh video editor.
//!
//! It owns no pixels and calls no codec. Instead it resolves what an edit *means* at the
//! frame-structure level:
//!
//! - Scoped operation graphs (timeline, track, clip) edited copy-on-write through
//!   [`upsert_graph`] and friends
//! - A flat per-range operation set resolved by [`compose_operations`]
//! - A synthetic I/P/B [`StructuralStream`] transformed by [`apply_pipeline`]
//! - Project validation with path-addressed diagnostics ([`validate_project`])
//! - A render boundary that hands a validated [`RenderJob`] to an external [`CodecEngine`]
//!
//! Composition, pipeline building and stream transforms are total: malformed input degrades
//! to identity. Only validation and the render/analyze boundary report errors.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod automation;
mod engine;
mod foundation;
mod graph;
mod ops;
mod project;
mod render;
mod validate;

pub use crate::foundation::core::{FrameRange, MAX_DURATION_FRAMES, gop_length, secs_to_frames};
pub use crate::foundation::error::{EngineError, EngineErrorCode, MoshError, MoshResult};

pub use crate::graph::scope::{ScopeId, ScopeKind, canonical_key};
pub use crate::graph::store::{
    GraphStore, NodeKind, OperationGraph, OperationNode, add_node, get_graph, move_node,
    remove_node, set_global_bypass, set_node_params, toggle_node_bypass, upsert_graph,
};

pub use crate::ops::compose::{active_kinds, compose_operations, dedup_key};
pub use crate::ops::flat::{
    DropKeyframesOp, DropPattern, FlatOperationSet, FreezeReferenceOp, HoldSmearOp,
    MotionVectorTransformOp, Operation, OperationKind, RedirectFramesOp,
};

pub use crate::engine::adapter::{build_pipeline, map_node, to_instance};
pub use crate::engine::pipeline::{
    DropIntraParams, DropPredictedParams, EngineOp, EngineOpKind, FreezeReferenceParams,
    HoldDuration, HoldReferenceParams, OperationInstance, Pipeline, ReferenceSelect, ScopeChain,
    StubKind,
};
pub use crate::engine::structural::{
    FrameType, StreamStats, StructuralFrame, StructuralStream, build_structural_stream,
};
pub use crate::engine::transform::{
    apply_chain, apply_for_scope, apply_op, apply_pipeline, classic_datamosh, drop_intra_frames,
    drop_predicted_frames, freeze_reference_frame, hold_reference_frame,
};

pub use crate::automation::curve::{
    AutomationCurve, AutomationPoint, AutomationTarget, Interpolation, param_range,
};
pub use crate::project::model::{
    Clip, Mask, MaskKeyframe, MaskTransform, Project, Source, Timeline, Track,
};
pub use crate::validate::diagnostic::{Diagnostic, DiagnosticKind, ValidationReport};
pub use crate::validate::project::{assert_valid, validate_project};

pub use crate::render::analyze::{Analysis, analyze_project};
pub use crate::render::job::{
    CodecEngine, EncodeStats, RecordingEngine, RenderJob, prepare_render, render_project,
};
pub use crate::render::settings::{
    Container, RateControl, RenderSettings, Resolution, VideoCodec,
};
