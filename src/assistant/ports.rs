//! Port contract for the external text-generation service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a [`TextGenerator`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextGenerationError {
    /// No API key is configured for the service.
    #[error("text generation service API key is not configured")]
    MissingCredential,

    /// The request could not be sent or the response could not be read.
    #[error("text generation request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("text generation service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the service.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("text generation response was malformed: {0}")]
    MalformedResponse(String),

    /// The response carried no text.
    #[error("text generation response contained no text")]
    EmptyResponse,
}

/// Result type for text generation.
pub type TextGenerationResult<T> = Result<T, TextGenerationError>;

/// Generates free text from a prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the service's reply to `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`TextGenerationError`] when the service cannot be reached,
    /// rejects the request, or replies without text.
    async fn generate(&self, prompt: &str) -> TextGenerationResult<String>;
}
