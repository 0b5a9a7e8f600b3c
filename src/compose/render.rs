use std::io::Cursor;

use image::{Rgba, RgbaImage, imageops};

use crate::{
    MatboardError, MatboardResult,
    compose::{RasterImage, layout::FramePlacement, params::LayoutParams},
    foundation::core::OutputFormat,
};

/// Fixed JPEG quality factor used by [`compose`].
pub const JPEG_QUALITY: u8 = 95;

/// Encoded output bytes tagged with their format.
#[derive(Clone, Debug)]
pub struct EncodedBuffer {
    /// The encoded payload.
    pub bytes: Vec<u8>,
    /// The encoding the payload carries.
    pub format: OutputFormat,
}

impl EncodedBuffer {
    /// MIME type of the payload.
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// File extension matching the payload, without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Composite one photo onto a square mat and encode the canvas.
///
/// Pure function of `(image, params)`: every call allocates an independent
/// canvas of exactly `output_size x output_size`, fills it with the mat
/// color, scales the photo uniformly into the interior without cropping,
/// centers it, and encodes to the requested format. PNG output is
/// byte-stable across identical calls; JPEG bytes depend on encoder
/// internals and are not guaranteed stable.
#[tracing::instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn compose(image: &RasterImage, params: &LayoutParams) -> MatboardResult<EncodedBuffer> {
    params.validate()?;
    let placement = FramePlacement::solve(image.width, image.height, params)?;

    // A RasterImage built through `from_rgba8` always passes; one assembled
    // by hand with a short buffer is treated as a decode failure, not a panic.
    let src: image::ImageBuffer<Rgba<u8>, &[u8]> =
        image::ImageBuffer::from_raw(image.width, image.height, image.rgba8.as_slice())
            .ok_or_else(|| {
                MatboardError::decode("raster pixel buffer does not match its dimensions")
            })?;

    let bg = Rgba([
        params.background.r,
        params.background.g,
        params.background.b,
        params.background.a,
    ]);
    let mut canvas = RgbaImage::from_pixel(params.output_size, params.output_size, bg);

    let scaled = imageops::resize(
        &src,
        placement.draw_w,
        placement.draw_h,
        imageops::FilterType::Lanczos3,
    );
    imageops::overlay(
        &mut canvas,
        &scaled,
        i64::from(placement.x),
        i64::from(placement.y),
    );

    encode_canvas(canvas, params.format)
}

fn encode_canvas(canvas: RgbaImage, format: OutputFormat) -> MatboardResult<EncodedBuffer> {
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            image::DynamicImage::ImageRgba8(canvas)
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
                .map_err(|e| MatboardError::encode(format!("png encode failed: {e}")))?;
        }
        OutputFormat::Jpeg => {
            // The JPEG encoder takes no alpha channel; the canvas is opaque
            // by validation, so the conversion is lossless.
            let rgb = image::DynamicImage::ImageRgba8(canvas).into_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)
                .map_err(|e| MatboardError::encode(format!("jpeg encode failed: {e}")))?;
        }
    }
    Ok(EncodedBuffer { bytes, format })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/render.rs"]
mod tests;
