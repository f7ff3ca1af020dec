use crate::{
    automation::curve::AutomationCurve,
    foundation::core::FrameRange,
    foundation::error::MoshResult,
    graph::store::GraphStore,
    ops::flat::FlatOperationSet,
    render::settings::RenderSettings,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete editing project.
///
/// This is the only persisted artifact. Structural streams and pipelines are derived from it
/// on demand and never stored.
pub struct Project {
    /// Project name; must be non-empty.
    pub name: String,
    /// Processing block size in frames; must be positive.
    pub block_size: i64,
    /// Timeline frame rate.
    pub fps: f64,
    /// Timeline duration in frames.
    #[serde(default)]
    pub duration_frames: i64,
    /// Seed for probabilistic operations in analyze/preview runs.
    #[serde(default)]
    pub seed: u64,
    /// Imported media.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Tracks and clips.
    pub timeline: Timeline,
    /// Masks restricting operations to regions of clips.
    #[serde(default)]
    pub masks: Vec<Mask>,
    /// Per-range timeline operations.
    #[serde(default)]
    pub operations: FlatOperationSet,
    /// Scoped operation graphs.
    #[serde(default)]
    pub graphs: GraphStore,
    /// Parameter automation.
    #[serde(default)]
    pub automation: Vec<AutomationCurve>,
    /// Last-used render settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Imported media file.
pub struct Source {
    /// Source id.
    pub id: String,
    /// Path as imported; not touched by this crate.
    pub path: String,
    /// Probed duration in frames, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_frames: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tracks plus the clips placed on them.
pub struct Timeline {
    /// Timeline id, used as the root of every scope.
    pub id: String,
    /// Tracks in stacking order.
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Clips; each names its track.
    #[serde(default)]
    pub clips: Vec<Clip>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A track.
pub struct Track {
    /// Track id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A clip placing part of a source on a track.
pub struct Clip {
    /// Clip id.
    pub id: String,
    /// Owning track.
    pub track_id: String,
    /// Source media.
    pub source_id: String,
    /// Timeline placement.
    pub range: FrameRange,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Animated rectangular region on one or more clips.
pub struct Mask {
    /// Mask id.
    pub id: String,
    /// Clips the mask applies to.
    #[serde(default)]
    pub clip_ids: Vec<String>,
    /// Transform keyframes ordered by time.
    #[serde(default)]
    pub keyframes: Vec<MaskKeyframe>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Mask transform at a point in time.
pub struct MaskKeyframe {
    /// Time in seconds.
    pub t: f64,
    /// Region at `t`.
    pub transform: MaskTransform,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Region in normalized clip coordinates.
pub struct MaskTransform {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; must be > 0.
    pub width: f64,
    /// Height; must be > 0.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
}

impl Project {
    /// Parse a project from JSON.
    pub fn from_json_str(s: &str) -> MoshResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> MoshResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.timeline.clips.iter().find(|c| c.id == id)
    }

    /// Look up a track by id.
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.timeline.tracks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
