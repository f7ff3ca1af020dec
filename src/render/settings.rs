use crate::ops::flat::OperationKind;

/// Output container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// MPEG-4 Part 14.
    #[default]
    Mp4,
    /// Audio Video Interleave.
    Avi,
    /// Matroska.
    Mkv,
    /// QuickTime.
    Mov,
}

/// Output video codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    /// H.264 / AVC.
    #[default]
    H264,
    /// MPEG-4 Part 2.
    Mpeg4,
    /// Xvid flavoured MPEG-4 Part 2.
    Xvid,
}

/// Output frame size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Encoder rate control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RateControl {
    /// Constant rate factor, `0..=51`.
    Crf {
        /// Rate factor.
        crf: u8,
    },
    /// Constant bitrate.
    ConstantBitrate {
        /// Target bitrate in kbit/s; must be > 0.
        kbps: u32,
    },
    /// Constant quantizer, `1..=51`.
    ConstantQuantizer {
        /// Quantizer.
        qp: u8,
    },
}

impl Default for RateControl {
    fn default() -> Self {
        Self::Crf { crf: 18 }
    }
}

/// Settings handed to the external codec engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Output container.
    #[serde(default)]
    pub container: Container,
    /// Output codec.
    #[serde(default)]
    pub codec: VideoCodec,
    /// Output frame size.
    #[serde(default)]
    pub resolution: Resolution,
    /// Rate control.
    #[serde(default)]
    pub rate_control: RateControl,
    /// Active datamosh operation kinds, in priority order. Filled in by
    /// [`crate::prepare_render`].
    #[serde(default)]
    pub datamosh: Vec<OperationKind>,
}

impl RenderSettings {
    /// Return settings the codec engine can accept, or every reason they cannot be.
    ///
    /// Odd dimensions are rounded down to even.
    pub fn normalized(&self) -> Result<RenderSettings, Vec<String>> {
        let mut errors = Vec::new();
        let mut out = self.clone();

        out.resolution.width &= !1;
        out.resolution.height &= !1;
        if out.resolution.width == 0 || out.resolution.height == 0 {
            errors.push(format!(
                "resolution {}x{} is too small",
                self.resolution.width, self.resolution.height
            ));
        }

        match self.rate_control {
            RateControl::Crf { crf } if crf > 51 => {
                errors.push(format!("crf {crf} must be <= 51"));
            }
            RateControl::ConstantBitrate { kbps: 0 } => {
                errors.push("bitrate must be > 0 kbps".to_string());
            }
            RateControl::ConstantQuantizer { qp } if qp == 0 || qp > 51 => {
                errors.push(format!("qp {qp} must be in 1..=51"));
            }
            _ => {}
        }

        if self.codec == VideoCodec::Xvid && !matches!(self.container, Container::Avi | Container::Mkv)
        {
            errors.push(format!(
                "codec {:?} cannot be muxed into {:?}",
                self.codec, self.container
            ));
        }

        if errors.is_empty() {
            Ok(out)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
