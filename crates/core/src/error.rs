//! Error types for the slide-deck core.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing or persisting a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// A slide index outside the presentation was requested.
    #[error("Slide index {index} out of range (presentation has {len} slides)")]
    SlideIndexOutOfRange { index: usize, len: usize },

    /// A paragraph or bullet index outside the slide's content was requested.
    #[error("{field} index {index} out of range (slide has {len})")]
    ItemIndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    /// A template tag outside the six known layouts.
    #[error("Unknown slide template: {0}")]
    UnknownTemplate(String),

    /// Failed to read or write the session file.
    #[error("Session storage error: {0}")]
    IoError(#[from] std::io::Error),

    /// The stored session blob could not be encoded or decoded.
    #[error("Session data is not valid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
