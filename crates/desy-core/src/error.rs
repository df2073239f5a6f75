//! Error types for Desy Core

use thiserror::Error;

/// Result type alias for screen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Screen error types
///
/// Screen-level operations on an unbound engine are null-tolerant no-ops and
/// never surface here; only engine construction and loading are fallible.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create playback engine: {0}")]
    EngineCreate(String),

    #[error("failed to load media '{uri}': {reason}")]
    MediaLoad { uri: String, reason: String },

    #[error("failed to prepare playback: {0}")]
    Prepare(String),

    #[error("invalid media URI: {0}")]
    InvalidMediaUri(#[from] url::ParseError),
}

impl Error {
    /// Create an engine-construction error
    pub fn engine(msg: impl Into<String>) -> Self {
        Error::EngineCreate(msg.into())
    }
}
