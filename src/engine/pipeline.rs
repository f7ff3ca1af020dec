use crate::engine::structural::FrameType;
use crate::graph::scope::{ScopeId, ScopeKind};

/// Execution-ready form of a project's scoped graphs.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pipeline {
    /// When set, the engine returns its input untouched.
    #[serde(default)]
    pub global_bypass: bool,
    /// Per-scope chains, timeline scopes first, then tracks, then clips.
    #[serde(default)]
    pub scopes: Vec<ScopeChain>,
}

impl Pipeline {
    /// Chains targeting scopes of `kind`, in pipeline order.
    pub fn chains_for_kind(&self, kind: ScopeKind) -> impl Iterator<Item = &ScopeChain> {
        self.scopes.iter().filter(move |c| c.scope_kind == kind)
    }

    /// Chains whose scope key equals `key`.
    pub fn chains_for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ScopeChain> {
        self.scopes.iter().filter(move |c| c.scope_key == key)
    }
}

/// Ordered operation chain for one scope.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScopeChain {
    /// Targeting level.
    pub scope_kind: ScopeKind,
    /// Canonical key of `scope`.
    pub scope_key: String,
    /// Scope the chain came from.
    pub scope: ScopeId,
    /// Operations in execution order.
    pub chain: Vec<OperationInstance>,
}

/// One operation ready to run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationInstance {
    /// Id of the graph node this came from.
    pub id: String,
    /// Disabled instances are skipped.
    pub enabled: bool,
    /// Mapped operation with typed parameters.
    pub op: EngineOp,
}

impl OperationInstance {
    /// Mapped kind of [`OperationInstance::op`].
    pub fn kind(&self) -> EngineOpKind {
        self.op.kind()
    }
}

/// Operations the transform engine understands, with their parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum EngineOp {
    /// Remove intra frames.
    DropIntraFrames(DropIntraParams),
    /// Remove predicted frames of selected types.
    DropPredictedFrames(DropPredictedParams),
    /// Hold one frame's content across a run.
    HoldReferenceFrame(HoldReferenceParams),
    /// Drop every intra frame but the first and glue predicted frames to it.
    ClassicDatamosh,
    /// Point every predicted frame at one reference.
    FreezeReferenceFrame(FreezeReferenceParams),
    /// Declared operation whose transform is the identity.
    Stub {
        /// Which declared operation.
        stub: StubKind,
        /// Parameters kept for the editor.
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        params: serde_json::Value,
    },
    /// Unrecognized node kind; passes the stream through.
    Inert {
        /// Node kind name as authored.
        name: String,
        /// Parameters kept for the editor.
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        params: serde_json::Value,
    },
}

impl EngineOp {
    /// Fieldless kind tag.
    pub fn kind(&self) -> EngineOpKind {
        match self {
            Self::DropIntraFrames(_) => EngineOpKind::DropIntraFrames,
            Self::DropPredictedFrames(_) => EngineOpKind::DropPredictedFrames,
            Self::HoldReferenceFrame(_) => EngineOpKind::HoldReferenceFrame,
            Self::ClassicDatamosh => EngineOpKind::ClassicDatamosh,
            Self::FreezeReferenceFrame(_) => EngineOpKind::FreezeReferenceFrame,
            Self::Stub { stub, .. } => EngineOpKind::Stub(*stub),
            Self::Inert { .. } => EngineOpKind::Inert,
        }
    }
}

/// Mapped operation kind without parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineOpKind {
    /// See [`EngineOp::DropIntraFrames`].
    DropIntraFrames,
    /// See [`EngineOp::DropPredictedFrames`].
    DropPredictedFrames,
    /// See [`EngineOp::HoldReferenceFrame`].
    HoldReferenceFrame,
    /// See [`EngineOp::ClassicDatamosh`].
    ClassicDatamosh,
    /// See [`EngineOp::FreezeReferenceFrame`].
    FreezeReferenceFrame,
    /// See [`EngineOp::Stub`].
    Stub(StubKind),
    /// See [`EngineOp::Inert`].
    Inert,
}

/// Declared operations reserved for later implementation. All map to the identity transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StubKind {
    /// Clamp motion vector magnitudes.
    ClampMotionVectors,
    /// Add noise to motion vectors.
    PerturbMotionVectors,
    /// Bias the quantizer.
    QuantizerBias,
    /// Shuffle reference chains.
    RandomizeReferenceChain,
    /// Cut reference chains short.
    TruncateReferenceChain,
    /// Scramble macroblock spatial coherence.
    ScrambleSpatialCoherence,
    /// Rewrite GOP topology.
    RewriteGopTopology,
    /// Visualize quantization noise.
    VisualizeQuantizationNoise,
}

impl StubKind {
    /// Every declared stub.
    pub const ALL: [StubKind; 8] = [
        StubKind::ClampMotionVectors,
        StubKind::PerturbMotionVectors,
        StubKind::QuantizerBias,
        StubKind::RandomizeReferenceChain,
        StubKind::TruncateReferenceChain,
        StubKind::ScrambleSpatialCoherence,
        StubKind::RewriteGopTopology,
        StubKind::VisualizeQuantizationNoise,
    ];
}

/// Parameters of [`EngineOp::DropIntraFrames`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropIntraParams {
    /// Drop probability in percent, `[0, 100]`.
    pub probability: f64,
    /// Only the first intra frame is ever a candidate.
    pub first_intra_only: bool,
}

impl Default for DropIntraParams {
    fn default() -> Self {
        Self {
            probability: 100.0,
            first_intra_only: false,
        }
    }
}

/// Parameters of [`EngineOp::DropPredictedFrames`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DropPredictedParams {
    /// Drop probability in percent, `[0, 100]`.
    pub probability: f64,
    /// Candidate types; only `P` and `B` are honoured.
    pub frame_types: Vec<FrameType>,
}

impl Default for DropPredictedParams {
    fn default() -> Self {
        Self {
            probability: 100.0,
            frame_types: vec![FrameType::Predicted, FrameType::Bidirectional],
        }
    }
}

/// How [`EngineOp::HoldReferenceFrame`] picks the frame to hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReferenceSelect {
    /// First intra frame.
    #[default]
    FirstIntra,
    /// Last intra frame.
    LastIntra,
    /// Frame with this index, clamped to the stream.
    SpecificFrameIndex {
        /// Requested frame index.
        index: u64,
    },
}

/// How long [`EngineOp::HoldReferenceFrame`] holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HoldDuration {
    /// Up to (not including) the next intra frame, or the end of the stream.
    #[default]
    UntilNextIntra,
    /// Literal frame count.
    FixedFrames {
        /// Frames held.
        frames: u64,
    },
    /// `round(seconds * fps)` frames.
    FixedSeconds {
        /// Seconds held.
        seconds: f64,
    },
}

/// Parameters of [`EngineOp::HoldReferenceFrame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HoldReferenceParams {
    /// Frame selection.
    pub select: ReferenceSelect,
    /// Run length.
    pub duration: HoldDuration,
}

/// Parameters of [`EngineOp::FreezeReferenceFrame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FreezeReferenceParams {
    /// Reference every predicted frame is pointed at.
    pub reference_index: u64,
}
