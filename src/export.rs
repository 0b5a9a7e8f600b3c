pub mod archive;
pub mod batch;
pub mod names;

use crate::{MatboardError, compose::RasterImage, compose::render::EncodedBuffer};

/// Fixed suggested file name for multi-item archives.
pub const ARCHIVE_FILE_NAME: &str = "framed-images.zip";

/// One photo queued for export.
///
/// `display_name` is the user-facing source name; its extension is stripped
/// and replaced with the output format's when naming the result.
#[derive(Clone, Debug)]
pub struct ExportItem {
    /// User-facing source name, extension included.
    pub display_name: String,
    /// The decoded photo to composite.
    pub image: RasterImage,
}

/// The data result of an export run.
#[derive(Clone, Debug)]
pub enum ExportOutput {
    /// Exactly one item was selected; its buffer is handed back directly.
    Single {
        /// Suggested file name (`stem.ext`).
        file_name: String,
        /// Encoded payload.
        buffer: EncodedBuffer,
    },
    /// Two or more items were selected and bundled into one zip container.
    Archive {
        /// Always [`ARCHIVE_FILE_NAME`].
        file_name: String,
        /// The zip container.
        bytes: Vec<u8>,
        /// Entry names inside the container, in input order.
        entry_names: Vec<String>,
    },
}

/// A batch item that failed to composite, paired with the cause.
#[derive(Debug)]
pub struct ExportFailure {
    /// The source name of the item that failed.
    pub display_name: String,
    /// Why it failed.
    pub error: MatboardError,
}

/// Outcome of [`export_all`](crate::export_all).
///
/// Batch runs report partial success explicitly: `output` carries whatever
/// was produced (nothing for an empty selection, or when every item failed)
/// and `failures` enumerates each item that did not make it, rather than
/// silently omitting entries from the archive.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// What was produced, if anything.
    pub output: Option<ExportOutput>,
    /// Items that did not make it, in input order.
    pub failures: Vec<ExportFailure>,
}
