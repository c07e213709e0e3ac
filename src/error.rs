//! Crate-level error type and `Result` alias for structured error handling.
//! Groups failures by where they happen: reading the source (input), inside a
//! transform step (recovered by the pipeline), and writing the result (output).
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source file not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("Unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Unsupported output format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Unable to move encoded image into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Canvas of {cols}x{rows} exceeds the {limit} pixel limit")]
    CanvasTooLarge { cols: u64, rows: u64, limit: u64 },

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Preset error: {0}")]
    Preset(#[from] serde_json::Error),
}

impl Error {
    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }

    pub fn transform<E: std::fmt::Display>(e: E) -> Self {
        Error::Transform(e.to_string())
    }

    /// True for failures caused by the source image rather than the destination.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::SourceMissing { .. } | Error::Decode(_) | Error::EmptyImage { .. }
        )
    }
}
