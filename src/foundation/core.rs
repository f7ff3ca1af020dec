use crate::foundation::error::{MoshError, MoshResult};

/// Half-open timeline range `[start, end)` in frames.
///
/// Deserialization does not enforce `start <= end`; malformed ranges are reported by the
/// validator instead of being rejected at load time.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameRange {
    /// First frame covered by the range.
    pub start: u64,
    /// One past the last frame covered by the range.
    pub end: u64, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: u64, end: u64) -> MoshResult<Self> {
        if start > end {
            return Err(MoshError::validation(vec![format!(
                "frame range start {start} must be <= end {end}"
            )]));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered (0 for inverted ranges).
    pub fn len_frames(self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// `true` when `start <= end`.
    pub fn is_well_formed(self) -> bool {
        self.start <= self.end
    }

    /// `true` when `frame` is inside `[start, end)`.
    pub fn contains(self, frame: u64) -> bool {
        self.start <= frame && frame < self.end
    }
}

/// Frames per group of pictures for a timeline rate: `round(max(1, fps))`.
pub fn gop_length(fps: f64) -> u64 {
    if !fps.is_finite() {
        return 1;
    }
    fps.max(1.0).round() as u64
}

/// Longest timeline the validator accepts: 24 hours at 240 fps.
pub const MAX_DURATION_FRAMES: i64 = 24 * 60 * 60 * 240;

/// Convert seconds to a frame count at `fps`, rounding to nearest and saturating at zero.
pub fn secs_to_frames(secs: f64, fps: f64) -> u64 {
    let frames = secs * fps;
    if !frames.is_finite() || frames <= 0.0 {
        return 0;
    }
    frames.round() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
