//! Error types for Drawbook Core

use thiserror::Error;

/// Result type alias using DrawbookError
pub type Result<T> = std::result::Result<T, DrawbookError>;

/// Top-level error type for all Drawbook operations
#[derive(Debug, Error)]
pub enum DrawbookError {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while producing a single illustration.
///
/// The generator never lets one of these escape a run; they are logged and
/// the slot stays pending.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service returned an empty response")]
    EmptyResponse,

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not save image: {0}")]
    Save(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Errors that occur while encoding or placing content in a deck
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Packaging failed: {0}")]
    Package(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Package(err.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.to_string())
    }
}
