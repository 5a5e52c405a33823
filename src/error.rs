use {
    image::ImageError,
    serde_json::Error as JsonError,
    std::{io::Error as IoError, path::PathBuf},
    thiserror::Error,
    toml::de::Error as TomlError,
};

/// Everything that can go wrong while building, saving or loading a bitmap font.
#[derive(Debug, Error)]
pub enum Error {
    /// The font backend could not parse the font file.
    #[error("unable to load font: {0}")]
    FontLoad(String),

    /// The metadata document or canvas image is not a valid bitmap font. Every problem with the
    /// contents of a loaded pair, including unparseable JSON or PNG data, is reported this way.
    #[error("invalid bitmap font: {0}")]
    Format(String),

    /// An I/O operation failed for a reason other than a missing file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The image codec failed to encode the canvas, or failed to read it for a reason other than
    /// bad image data.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The metadata document could not be serialized.
    #[error(transparent)]
    Json(#[from] JsonError),

    /// A required file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The font backend failed to measure or render a code point.
    #[error("unable to rasterize {ch:?}: status {status}")]
    Rasterization {
        /// The code point being rasterized.
        ch: char,
        /// Backend specific status code.
        status: i32,
    },

    /// A bitmap font asset file could not be parsed.
    #[error(transparent)]
    Toml(#[from] TomlError),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Returns `true` if this error was caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
