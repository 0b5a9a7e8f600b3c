use crate::{MatboardError, MatboardResult, compose::params::LayoutParams};

/// Solved mat geometry for one composition.
///
/// All quantities are pixels on the output canvas. The interior is the square
/// between the mat edges; the drawn rectangle sits centered inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlacement {
    /// Mat thickness per side.
    pub border: u32,
    /// Interior square edge (`output_size - 2 * border`).
    pub interior: u32,
    /// Drawn photo width after uniform scaling.
    pub draw_w: u32,
    /// Drawn photo height after uniform scaling.
    pub draw_h: u32,
    /// Left edge of the drawn photo on the canvas.
    pub x: u32,
    /// Top edge of the drawn photo on the canvas.
    pub y: u32,
}

impl FramePlacement {
    /// Solve mat geometry for a `src_w x src_h` photo under `params`.
    ///
    /// Uniform scale `min(interior / src_w, interior / src_h)`: the photo is
    /// never cropped, only scaled to fit the interior and centered, leaving
    /// mat-colored margin on the longer axis (letterbox/pillarbox).
    ///
    /// A valid interior with an extreme aspect ratio can round a drawn edge
    /// down to zero; drawn edges are clamped to at least 1 px.
    pub fn solve(src_w: u32, src_h: u32, params: &LayoutParams) -> MatboardResult<Self> {
        if src_w == 0 || src_h == 0 {
            return Err(MatboardError::validation(
                "source image must have positive dimensions",
            ));
        }
        let border = params.border_px();
        let interior = params.interior_px();
        if interior == 0 {
            return Err(MatboardError::validation(format!(
                "mat of {border} px per side leaves no interior on a {} px canvas",
                params.output_size
            )));
        }

        let scale = (f64::from(interior) / f64::from(src_w))
            .min(f64::from(interior) / f64::from(src_h));
        let draw_w = ((f64::from(src_w) * scale).round() as u32).clamp(1, interior);
        let draw_h = ((f64::from(src_h) * scale).round() as u32).clamp(1, interior);

        Ok(Self {
            border,
            interior,
            draw_w,
            draw_h,
            x: border + (interior - draw_w) / 2,
            y: border + (interior - draw_h) / 2,
        })
    }

    /// Uniform scale actually applied, derived from the longer drawn edge.
    pub fn scale(&self, src_w: u32, src_h: u32) -> f64 {
        if self.draw_w >= self.draw_h {
            f64::from(self.draw_w) / f64::from(src_w)
        } else {
            f64::from(self.draw_h) / f64::from(src_h)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
