use std::ops::RangeInclusive;

use crate::{
    MatboardError, MatboardResult,
    foundation::core::{OutputFormat, Rgba8},
};

/// Output canvas sizes accepted by [`LayoutParams::validate`].
pub const OUTPUT_SIZES: [u32; 4] = [1200, 1600, 2000, 3000];

/// Frame percent bounds (inclusive) accepted by [`LayoutParams::validate`].
pub const FRAME_PERCENT_RANGE: RangeInclusive<f64> = 2.0..=20.0;

/// Layout parameters for one compositing call.
///
/// Immutable per call and supplied fresh each invocation; there is no shared
/// mutable parameter state between calls.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutParams {
    /// Mat thickness as a percentage of the output edge.
    pub frame_percent: f64,
    /// Output canvas edge in pixels; the canvas is always square.
    pub output_size: u32,
    /// Output encoding.
    pub format: OutputFormat,
    /// Mat and backing-fill color.
    #[serde(default = "default_background")]
    pub background: Rgba8,
}

fn default_background() -> Rgba8 {
    Rgba8::WHITE
}

impl LayoutParams {
    /// Params with the classic white mat.
    pub fn new(frame_percent: f64, output_size: u32, format: OutputFormat) -> Self {
        Self {
            frame_percent,
            output_size,
            format,
            background: Rgba8::WHITE,
        }
    }

    /// Check every invariant the compositor relies on.
    ///
    /// Rejects a non-finite or out-of-range frame percent, an output size
    /// outside [`OUTPUT_SIZES`], a translucent background, and a mat so thick
    /// it leaves no interior for the photo.
    pub fn validate(&self) -> MatboardResult<()> {
        if !self.frame_percent.is_finite() || !FRAME_PERCENT_RANGE.contains(&self.frame_percent) {
            return Err(MatboardError::validation(format!(
                "frame_percent must be within {:?}, got {}",
                FRAME_PERCENT_RANGE, self.frame_percent
            )));
        }
        if !OUTPUT_SIZES.contains(&self.output_size) {
            return Err(MatboardError::validation(format!(
                "output_size must be one of {:?}, got {}",
                OUTPUT_SIZES, self.output_size
            )));
        }
        if self.background.a != 255 {
            return Err(MatboardError::validation(
                "background must be opaque (alpha 255)",
            ));
        }
        if self.interior_px() == 0 {
            return Err(MatboardError::validation(format!(
                "mat of {} px per side leaves no interior on a {} px canvas",
                self.border_px(),
                self.output_size
            )));
        }
        Ok(())
    }

    /// Mat thickness in pixels: `round(frame_percent / 100 * output_size)`.
    pub fn border_px(&self) -> u32 {
        (self.frame_percent / 100.0 * f64::from(self.output_size)).round() as u32
    }

    /// Interior square edge left for the photo after the mat on both sides.
    pub fn interior_px(&self) -> u32 {
        self.output_size.saturating_sub(2 * self.border_px())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/params.rs"]
mod tests;
