//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::assistant::ports::{TextGenerationError, TextGenerationResult, TextGenerator};

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Default request timeout in seconds.
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 20;

/// Connection settings for [`GeminiTextGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiConfig {
    /// Creates settings with the default endpoint, model, and timeout.
    ///
    /// Blank keys are treated as missing.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns `true` when an API key is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.model)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// [`TextGenerator`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextGenerator {
    /// Builds an HTTP client for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TextGenerationError::Transport`] when the client cannot be
    /// constructed.
    pub fn new(config: GeminiConfig) -> TextGenerationResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|error| {
                TextGenerationError::Transport(format!("failed to build HTTP client: {error}"))
            })?;
        Ok(Self { config, client })
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> TextGenerationResult<String> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(TextGenerationError::MissingCredential);
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .map_err(|error| TextGenerationError::Transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TextGenerationError::Transport(error.to_string()))?;
        if !status.is_success() {
            return Err(TextGenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|error| TextGenerationError::MalformedResponse(error.to_string()))?;
        let text = parsed
            .into_text()
            .ok_or(TextGenerationError::EmptyResponse)?;
        debug!(model = %self.config.model, chars = text.len(), "text generated");
        Ok(text)
    }
}
