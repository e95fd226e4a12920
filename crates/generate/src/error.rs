//! Error types for slide generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or regenerating slides.
#[derive(Error, Debug)]
pub enum Error {
    /// No API key was configured for the completion service.
    #[error("OpenRouter API key not configured")]
    MissingApiKey,

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The completion service answered with a non-success status.
    #[error("OpenRouter API error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The completion service answered without any message content.
    #[error("Completion contained no message content")]
    EmptyCompletion,

    /// No bracketed JSON region was found in the model output.
    #[error("No JSON {expected} found in model output")]
    NoJsonFound { expected: &'static str },

    /// The bracketed region was not valid JSON.
    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),

    /// The JSON was valid but did not match the slide schema.
    #[error("Model output does not match the slide schema: {0}")]
    Schema(serde_json::Error),

    /// The model returned an empty slide array.
    #[error("Model returned no slides")]
    NoSlides,

    /// The session store rejected the generated presentation.
    #[error("Session error: {0}")]
    Session(#[from] deck_core::Error),
}

impl Error {
    /// True for the configuration error class.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }

    /// True for failures to turn model output into slides.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::EmptyCompletion
                | Self::NoJsonFound { .. }
                | Self::InvalidJson(_)
                | Self::Schema(_)
                | Self::NoSlides
        )
    }
}
