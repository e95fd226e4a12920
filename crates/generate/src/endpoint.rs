//! Request/response contract of the generation and regeneration endpoints.
//!
//! Failures are reduced to a fixed-shape `{ "error": ... }` body. Only the
//! configuration error names its cause; everything else gets a generic
//! message so model output never reaches the user.

use crate::client::CompletionBackend;
use crate::error::Error;
use crate::generator::SlideGenerator;
use crate::prompt::{GenerationRequest, RegenerationRequest};
use deck_core::{Presentation, SessionStore, Slide};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str = "OpenRouter API key not configured";

/// Message returned for any other generation failure.
pub const GENERATE_FAILED_MESSAGE: &str = "Failed to generate slides";

/// Message returned for any other regeneration failure.
pub const REGENERATE_FAILED_MESSAGE: &str = "Failed to regenerate slide";

/// Status code used for every failure.
pub const ERROR_STATUS: u16 = 500;

/// Successful generation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub slides: Vec<Slide>,
}

/// Successful regeneration body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegenerateResponse {
    pub slide: Slide,
}

/// Failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed endpoint call: status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointError {
    pub status: u16,
    pub body: ErrorResponse,
}

impl EndpointError {
    /// Map an internal error to its public form.
    pub fn from_error(error: &Error, fallback: &str) -> Self {
        log::error!("{}: {}", fallback, error);

        let message = if error.is_config() {
            MISSING_KEY_MESSAGE
        } else {
            fallback
        };

        Self {
            status: ERROR_STATUS,
            body: ErrorResponse {
                error: message.to_string(),
            },
        }
    }
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.body.error, self.status)
    }
}

impl std::error::Error for EndpointError {}

impl<B: CompletionBackend> SlideGenerator<B> {
    /// Generation endpoint: `{ slides }` or `{ error }`.
    pub async fn handle_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateResponse, EndpointError> {
        self.generate(request)
            .await
            .map(|slides| GenerateResponse { slides })
            .map_err(|e| EndpointError::from_error(&e, GENERATE_FAILED_MESSAGE))
    }

    /// Generation endpoint that also makes the result the session's
    /// active presentation. Nothing is stored on failure.
    pub async fn handle_generate_presentation(
        &self,
        request: &GenerationRequest,
        store: &mut dyn SessionStore,
    ) -> Result<Presentation, EndpointError> {
        self.generate_presentation(request, store)
            .await
            .map_err(|e| EndpointError::from_error(&e, GENERATE_FAILED_MESSAGE))
    }

    /// Regeneration endpoint: `{ slide }` or `{ error }`.
    pub async fn handle_regenerate(
        &self,
        request: &RegenerationRequest,
    ) -> Result<RegenerateResponse, EndpointError> {
        self.regenerate(request)
            .await
            .map(|slide| RegenerateResponse { slide })
            .map_err(|e| EndpointError::from_error(&e, REGENERATE_FAILED_MESSAGE))
    }
}
