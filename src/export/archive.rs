use std::io::{Cursor, Write};

use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{MatboardError, MatboardResult, compose::render::EncodedBuffer};

/// Pack named encoded buffers into a single in-memory zip container.
///
/// Entries are stored uncompressed: JPEG and PNG payloads do not deflate
/// usefully. Writes are serialized by construction; callers parallelize
/// encoding, never archive assembly.
pub(crate) fn pack_entries(entries: &[(String, EncodedBuffer)]) -> MatboardResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, buffer) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| MatboardError::archive(format!("start entry '{name}': {e}")))?;
        writer
            .write_all(&buffer.bytes)
            .map_err(|e| MatboardError::archive(format!("write entry '{name}': {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| MatboardError::archive(format!("finish archive: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/export/archive.rs"]
mod tests;
