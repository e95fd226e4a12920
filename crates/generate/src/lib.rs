//! Slide generation backend: prompt building, model-output parsing, and the
//! OpenRouter chat-completion client.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod extract;
pub mod generator;
pub mod prompt;

pub use client::{ClientConfig, CompletionBackend, OpenRouterClient};
pub use endpoint::{EndpointError, ErrorResponse, GenerateResponse, RegenerateResponse};
pub use error::{Error, Result};
pub use extract::{parse_slide, parse_slides};
pub use generator::SlideGenerator;
pub use prompt::{GenerationRequest, RegenerationRequest, DEFAULT_SLIDE_COUNT};
