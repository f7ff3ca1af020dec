use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::core::FrameRange;

/// The five timeline-range operation kinds of the flat model.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Remove keyframes inside a range.
    DropKeyframes,
    /// Pin predicted frames to one reference.
    FreezeReference,
    /// Re-point a range of frames at another source range.
    RedirectFrames,
    /// Hold and smear frames across a range.
    HoldSmear,
    /// Scale/jitter/quantize/drift motion vectors.
    MotionVectorTransform,
}

impl OperationKind {
    /// Composition priority, highest first.
    pub const PRIORITY: [OperationKind; 5] = [
        OperationKind::DropKeyframes,
        OperationKind::FreezeReference,
        OperationKind::RedirectFrames,
        OperationKind::HoldSmear,
        OperationKind::MotionVectorTransform,
    ];

    /// Serialized name, also the field name in [`FlatOperationSet`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DropKeyframes => "drop_keyframes",
            Self::FreezeReference => "freeze_reference",
            Self::RedirectFrames => "redirect_frames",
            Self::HoldSmear => "hold_smear",
            Self::MotionVectorTransform => "motion_vector_transform",
        }
    }

    /// Position in [`OperationKind::PRIORITY`].
    pub fn priority(self) -> usize {
        match self {
            Self::DropKeyframes => 0,
            Self::FreezeReference => 1,
            Self::RedirectFrames => 2,
            Self::HoldSmear => 3,
            Self::MotionVectorTransform => 4,
        }
    }

    /// Human-readable label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::DropKeyframes => "DropKeyframes",
            Self::FreezeReference => "FreezeReference",
            Self::RedirectFrames => "RedirectFrames",
            Self::HoldSmear => "HoldSmear",
            Self::MotionVectorTransform => "MotionVectorTransform",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Remove keyframes inside `range`, optionally following a pattern.
pub struct DropKeyframesOp {
    /// Operation id.
    pub id: String,
    /// Affected timeline range.
    pub range: FrameRange,
    /// Target clip; `None` targets every clip under the range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// Optional mask restricting the affected area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_id: Option<String>,
    /// Optional drop pattern; without one every keyframe in range is dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<DropPattern>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Which keyframes a [`DropKeyframesOp`] removes.
pub struct DropPattern {
    /// Drop only every n-th keyframe. Must be positive when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_nth: Option<i64>,
    /// Keyframes skipped before the pattern starts counting.
    #[serde(default)]
    pub offset: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Pin every predicted frame in `range` to `reference_frame`.
pub struct FreezeReferenceOp {
    /// Operation id.
    pub id: String,
    /// Affected timeline range.
    pub range: FrameRange,
    /// Target clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// Optional mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_id: Option<String>,
    /// Frame whose content becomes the frozen reference.
    #[serde(default)]
    pub reference_frame: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Re-point the frames of `source_range` so they land at `anchor`.
pub struct RedirectFramesOp {
    /// Operation id.
    pub id: String,
    /// Affected timeline range.
    pub range: FrameRange,
    /// Target clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// Optional mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_id: Option<String>,
    /// Range the redirected prediction reads from.
    pub source_range: FrameRange,
    /// Destination frame the redirected chain is anchored to.
    pub anchor: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Hold frames in `range` and smear their motion forward.
pub struct HoldSmearOp {
    /// Operation id.
    pub id: String,
    /// Affected timeline range.
    pub range: FrameRange,
    /// Target clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// Optional mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_id: Option<String>,
    /// Frames each held frame is repeated for.
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u64,
}

fn default_hold_frames() -> u64 {
    1
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Transform motion vectors in `range`. Parameters are automatable by name.
pub struct MotionVectorTransformOp {
    /// Operation id.
    pub id: String,
    /// Affected timeline range.
    pub range: FrameRange,
    /// Target clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// Optional mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_id: Option<String>,
    /// Vector magnitude multiplier, `[0, 4]`.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Random jitter amount, `[0, 1]`.
    #[serde(default)]
    pub jitter: f64,
    /// Quantization step, `[0, 8]`.
    #[serde(default)]
    pub quantize: f64,
    /// Constant drift in pixels, `[-50, 50]`.
    #[serde(default)]
    pub drift: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// One operation of any flat kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// See [`DropKeyframesOp`].
    DropKeyframes(DropKeyframesOp),
    /// See [`FreezeReferenceOp`].
    FreezeReference(FreezeReferenceOp),
    /// See [`RedirectFramesOp`].
    RedirectFrames(RedirectFramesOp),
    /// See [`HoldSmearOp`].
    HoldSmear(HoldSmearOp),
    /// See [`MotionVectorTransformOp`].
    MotionVectorTransform(MotionVectorTransformOp),
}

impl Operation {
    /// Kind tag.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::DropKeyframes(_) => OperationKind::DropKeyframes,
            Self::FreezeReference(_) => OperationKind::FreezeReference,
            Self::RedirectFrames(_) => OperationKind::RedirectFrames,
            Self::HoldSmear(_) => OperationKind::HoldSmear,
            Self::MotionVectorTransform(_) => OperationKind::MotionVectorTransform,
        }
    }

    /// Operation id.
    pub fn id(&self) -> &str {
        match self {
            Self::DropKeyframes(op) => &op.id,
            Self::FreezeReference(op) => &op.id,
            Self::RedirectFrames(op) => &op.id,
            Self::HoldSmear(op) => &op.id,
            Self::MotionVectorTransform(op) => &op.id,
        }
    }

    /// Affected timeline range.
    pub fn range(&self) -> FrameRange {
        match self {
            Self::DropKeyframes(op) => op.range,
            Self::FreezeReference(op) => op.range,
            Self::RedirectFrames(op) => op.range,
            Self::HoldSmear(op) => op.range,
            Self::MotionVectorTransform(op) => op.range,
        }
    }

    /// Target clip, if any.
    pub fn clip_id(&self) -> Option<&str> {
        match self {
            Self::DropKeyframes(op) => op.clip_id.as_deref(),
            Self::FreezeReference(op) => op.clip_id.as_deref(),
            Self::RedirectFrames(op) => op.clip_id.as_deref(),
            Self::HoldSmear(op) => op.clip_id.as_deref(),
            Self::MotionVectorTransform(op) => op.clip_id.as_deref(),
        }
    }

    /// Mask, if any.
    pub fn mask_id(&self) -> Option<&str> {
        match self {
            Self::DropKeyframes(op) => op.mask_id.as_deref(),
            Self::FreezeReference(op) => op.mask_id.as_deref(),
            Self::RedirectFrames(op) => op.mask_id.as_deref(),
            Self::HoldSmear(op) => op.mask_id.as_deref(),
            Self::MotionVectorTransform(op) => op.mask_id.as_deref(),
        }
    }
}

/// Per-kind ordered operation lists edited on the timeline.
///
/// Keys other than the five known kinds are kept in `extra` so they survive a load/save
/// cycle; the validator reports them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlatOperationSet {
    /// [`OperationKind::DropKeyframes`] entries in insertion order.
    #[serde(default)]
    pub drop_keyframes: Vec<DropKeyframesOp>,
    /// [`OperationKind::FreezeReference`] entries in insertion order.
    #[serde(default)]
    pub freeze_reference: Vec<FreezeReferenceOp>,
    /// [`OperationKind::RedirectFrames`] entries in insertion order.
    #[serde(default)]
    pub redirect_frames: Vec<RedirectFramesOp>,
    /// [`OperationKind::HoldSmear`] entries in insertion order.
    #[serde(default)]
    pub hold_smear: Vec<HoldSmearOp>,
    /// [`OperationKind::MotionVectorTransform`] entries in insertion order.
    #[serde(default)]
    pub motion_vector_transform: Vec<MotionVectorTransformOp>,
    /// Unrecognized operation-kind lists.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FlatOperationSet {
    /// Return a set with `op` appended to its kind's list.
    pub fn with_operation(mut self, op: Operation) -> Self {
        match op {
            Operation::DropKeyframes(op) => self.drop_keyframes.push(op),
            Operation::FreezeReference(op) => self.freeze_reference.push(op),
            Operation::RedirectFrames(op) => self.redirect_frames.push(op),
            Operation::HoldSmear(op) => self.hold_smear.push(op),
            Operation::MotionVectorTransform(op) => self.motion_vector_transform.push(op),
        }
        self
    }

    /// Operations of one kind, in insertion order.
    pub fn of_kind(&self, kind: OperationKind) -> Vec<Operation> {
        match kind {
            OperationKind::DropKeyframes => self
                .drop_keyframes
                .iter()
                .cloned()
                .map(Operation::DropKeyframes)
                .collect(),
            OperationKind::FreezeReference => self
                .freeze_reference
                .iter()
                .cloned()
                .map(Operation::FreezeReference)
                .collect(),
            OperationKind::RedirectFrames => self
                .redirect_frames
                .iter()
                .cloned()
                .map(Operation::RedirectFrames)
                .collect(),
            OperationKind::HoldSmear => self
                .hold_smear
                .iter()
                .cloned()
                .map(Operation::HoldSmear)
                .collect(),
            OperationKind::MotionVectorTransform => self
                .motion_vector_transform
                .iter()
                .cloned()
                .map(Operation::MotionVectorTransform)
                .collect(),
        }
    }

    /// Every operation, kind by kind in priority order.
    pub fn all(&self) -> Vec<Operation> {
        OperationKind::PRIORITY
            .into_iter()
            .flat_map(|k| self.of_kind(k))
            .collect()
    }

    /// Names of kind lists this build does not recognize.
    pub fn unknown_kinds(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }

    /// `true` when no operation of any known kind is present.
    pub fn is_empty(&self) -> bool {
        self.drop_keyframes.is_empty()
            && self.freeze_reference.is_empty()
            && self.redirect_frames.is_empty()
            && self.hold_smear.is_empty()
            && self.motion_vector_transform.is_empty()
    }
}
