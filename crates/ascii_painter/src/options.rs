use serde::Deserialize;

use crate::{AsciiError, DensityRamp};

/// Pivot used by the contrast enhancement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastPivot {
    /// Scale around the middle of the 0..=255 range.
    #[default]
    MidGray,
    /// Scale around the image's mean luminance.
    Mean,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AsciiOptions {
    pub ramp: DensityRamp,
    /// Contrast multiplier applied at full resolution (1.0 leaves it unchanged).
    pub contrast: f32,
    pub contrast_pivot: ContrastPivot,
    /// Added to every resized luminance sample, conventionally in [-50, 50].
    pub brightness_offset: i32,
    /// Glyph width / height ratio used when deriving the row count.
    pub aspect_correction: f32,
    /// Exponent applied to normalized luminance before glyph selection.
    pub gamma: f32,
    /// Map bright pixels to dense glyphs, for light-on-dark displays.
    /// Selects `ramp[N - 1 - level]`, matching tools that index the ramp from
    /// the light end.
    pub invert: bool,
}

impl Default for AsciiOptions {
    fn default() -> Self {
        Self {
            ramp: DensityRamp::default(),
            contrast: 2.0,
            contrast_pivot: ContrastPivot::MidGray,
            brightness_offset: 10,
            aspect_correction: 0.5,
            gamma: 0.6,
            invert: false,
        }
    }
}

impl AsciiOptions {
    pub fn validate(&self) -> Result<(), AsciiError> {
        if self.ramp.len() < 2 {
            return Err(AsciiError::InvalidRamp(self.ramp.len()));
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(invalid(format!(
                "contrast must be a non-negative number, got {}",
                self.contrast
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(invalid(format!("gamma must be positive, got {}", self.gamma)));
        }
        if !self.aspect_correction.is_finite() || self.aspect_correction <= 0.0 {
            return Err(invalid(format!(
                "aspect correction must be positive, got {}",
                self.aspect_correction
            )));
        }
        if !(-255..=255).contains(&self.brightness_offset) {
            return Err(invalid(format!(
                "brightness offset must be within -255..=255, got {}",
                self.brightness_offset
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> AsciiError {
    AsciiError::InvalidArgument(message)
}
