/// Result alias used across the crate.
pub type CreativeResult<T> = Result<T, CreativeError>;

/// Errors produced by the composition and color-science engine.
///
/// "No brand color matched" is never an error: color selection always falls back to
/// black/white and reports the achieved contrast instead.
#[derive(thiserror::Error, Debug)]
pub enum CreativeError {
    /// Malformed hex color string.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// Source raster could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Font data could not be loaded or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid argument or configuration value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failure while reading or writing artifacts.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoder/decoder failure reported by the `image` crate.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Configuration or report (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CreativeError {
    /// Build an [`CreativeError::InvalidColorFormat`].
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build a [`CreativeError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CreativeError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CreativeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
