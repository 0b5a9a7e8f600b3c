pub mod layout;
pub mod params;
pub mod render;

use std::sync::Arc;

use crate::{MatboardError, MatboardResult};

/// An immutable decoded bitmap, owned by the caller and only read here.
///
/// Pixels are straight (non-premultiplied) RGBA8, row-major, tightly packed
/// behind an `Arc` so cloning into parallel batch workers is cheap.
#[derive(Clone, Debug)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap a straight RGBA8 pixel buffer, checking it matches its dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> MatboardResult<Self> {
        if width == 0 || height == 0 {
            return Err(MatboardError::validation(
                "RasterImage dimensions must be positive",
            ));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba8.len() != expected {
            return Err(MatboardError::decode(format!(
                "RasterImage pixel buffer length {} does not match {width}x{height} RGBA8",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }
}
