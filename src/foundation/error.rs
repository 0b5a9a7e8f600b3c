/// Convenience result type used across Matboard.
pub type MatboardResult<T> = Result<T, MatboardError>;

/// Top-level error taxonomy used by the compositing and export APIs.
///
/// Every failure is scoped to one export operation; nothing here is fatal to
/// the host process, and no in-memory image or parameter state survives a
/// failed call.
#[derive(thiserror::Error, Debug)]
pub enum MatboardError {
    /// Invalid layout parameters or source image data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A supplied byte buffer could not be decoded into a raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Canvas-to-bytes encoding failed for the requested format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Assembly of the batch zip archive failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// The export run was abandoned via a raised [`CancelFlag`](crate::CancelFlag).
    #[error("export cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatboardError {
    /// Build a [`MatboardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MatboardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MatboardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MatboardError::Archive`] value.
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
