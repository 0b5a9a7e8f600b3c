use crate::{MatboardError, MatboardResult, compose::RasterImage};

/// Decode encoded image bytes and convert to straight RGBA8.
///
/// Accepts any container the `image` crate recognizes from its magic bytes.
/// This is the boundary helper the UI shell calls once per selected file,
/// before any compositing starts; a failure here is a [`MatboardError::Decode`].
pub fn decode_image(bytes: &[u8]) -> MatboardResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MatboardError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
