use crate::foundation::core::gop_length;

/// Structural frame marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FrameType {
    /// Intra-coded.
    #[serde(rename = "I")]
    Intra,
    /// Forward-predicted.
    #[serde(rename = "P")]
    Predicted,
    /// Bidirectionally predicted.
    #[serde(rename = "B")]
    Bidirectional,
}

impl FrameType {
    /// Single-letter code.
    pub fn letter(self) -> char {
        match self {
            Self::Intra => 'I',
            Self::Predicted => 'P',
            Self::Bidirectional => 'B',
        }
    }
}

/// One frame of a synthetic GOP.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StructuralFrame {
    /// Original position in the stream. Not renumbered when frames are removed.
    pub index: u64,
    /// Frame type marker.
    pub frame_type: FrameType,
    /// Frames this frame predicts from. Empty for intra frames.
    #[serde(default)]
    pub reference_indices: Vec<u64>,
    /// `true` for frames that start a GOP.
    #[serde(default)]
    pub is_keyframe: bool,
    /// Frame whose decoded content this frame shows, when rewritten by a hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_from: Option<u64>,
}

impl StructuralFrame {
    /// Index of the frame whose content this frame shows.
    pub fn content_source(&self) -> u64 {
        self.content_from.unwrap_or(self.index)
    }

    /// `true` for [`FrameType::Intra`].
    pub fn is_intra(&self) -> bool {
        self.frame_type == FrameType::Intra
    }
}

/// Ordered sequence of structural frames plus the rate it was built at.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructuralStream {
    /// Frame rate used for time-based parameters.
    pub fps: f64,
    /// Frames in presentation order.
    pub frames: Vec<StructuralFrame>,
}

impl StructuralStream {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when the stream holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame type letters, e.g. `"IPBPI"`.
    pub fn pattern(&self) -> String {
        self.frames.iter().map(|f| f.frame_type.letter()).collect()
    }

    /// Per-type frame counts.
    pub fn stats(&self) -> StreamStats {
        let mut stats = StreamStats::default();
        for f in &self.frames {
            match f.frame_type {
                FrameType::Intra => stats.intra += 1,
                FrameType::Predicted => stats.predicted += 1,
                FrameType::Bidirectional => stats.bidirectional += 1,
            }
        }
        stats.total = self.frames.len();
        stats
    }
}

/// Frame counts by type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StreamStats {
    /// Intra frames.
    pub intra: usize,
    /// Predicted frames.
    pub predicted: usize,
    /// Bidirectional frames.
    pub bidirectional: usize,
    /// All frames.
    pub total: usize,
}

// Streams longer than this grow on demand.
const PREALLOC_FRAMES: u64 = 1 << 16;

/// Synthesize a pseudo-GOP of `duration_frames` frames at `fps`.
///
/// A new GOP starts every `round(max(1, fps))` frames with an intra frame. Inside a GOP,
/// odd offsets are `P` and even offsets are `B`. Every predicted frame references the
/// GOP's intra frame. Non-positive durations give an empty stream.
pub fn build_structural_stream(duration_frames: i64, fps: f64) -> StructuralStream {
    let gop = gop_length(fps);
    let len = u64::try_from(duration_frames).unwrap_or(0);

    let mut frames = Vec::with_capacity(usize::try_from(len.min(PREALLOC_FRAMES)).unwrap_or(0));
    let mut last_intra = 0u64;
    for i in 0..len {
        let offset = i % gop;
        if offset == 0 {
            last_intra = i;
            frames.push(StructuralFrame {
                index: i,
                frame_type: FrameType::Intra,
                reference_indices: Vec::new(),
                is_keyframe: true,
                content_from: None,
            });
            continue;
        }
        let frame_type = if offset % 2 == 0 {
            FrameType::Bidirectional
        } else {
            FrameType::Predicted
        };
        frames.push(StructuralFrame {
            index: i,
            frame_type,
            reference_indices: vec![last_intra],
            is_keyframe: false,
            content_from: None,
        });
    }

    StructuralStream { fps, frames }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/structural.rs"]
mod tests;
