//! Matboard composites a photo onto a square mat and encodes the result.
//!
//! The crate is the pure core behind a picture-framing UI: the shell decodes
//! user-supplied files, picks layout parameters, and hands both to this crate,
//! which returns encoded bytes ready to save. Nothing here touches the
//! filesystem or network.
//!
//! # Pipeline overview
//!
//! 1. **Decode** (boundary helper): [`decode_image`] turns encoded bytes into
//!    an immutable [`RasterImage`].
//! 2. **Solve**: [`FramePlacement::solve`] computes the mat border, interior
//!    square, uniform scale and centered placement (pure geometry).
//! 3. **Compose**: [`compose`] fills a square canvas with the mat color,
//!    scales the photo into the interior without cropping, and encodes to
//!    JPEG or PNG as an [`EncodedBuffer`].
//! 4. **Export**: [`export_all`] runs the compositor over a whole selection,
//!    with per-item failures enumerated instead of dropped: one item yields
//!    a single buffer, several yield one zip archive.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: composing is a pure function of
//!   `(image, params)`; PNG output is byte-stable across calls.
//! - **No shared render state**: every call allocates its own canvas, so
//!   batch items composite safely in parallel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod export;
mod foundation;

pub use assets::decode::decode_image;
pub use compose::RasterImage;
pub use compose::layout::FramePlacement;
pub use compose::params::{FRAME_PERCENT_RANGE, LayoutParams, OUTPUT_SIZES};
pub use compose::render::{EncodedBuffer, JPEG_QUALITY, compose};
pub use export::batch::{CancelFlag, ExportOptions, ExportThreading, ProgressFlag, export_all};
pub use export::{
    ARCHIVE_FILE_NAME, ExportFailure, ExportItem, ExportOutput, ExportReport,
};
pub use foundation::core::{OutputFormat, Rgba8};
pub use foundation::error::{MatboardError, MatboardResult};
