//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` API with no
//! domain-specific logic. Supports text generation with optional Google
//! Search grounding.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateContentRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content(
//!         GenerateContentRequest::new("Summarize public records for Jane Doe")
//!             .with_google_search(),
//!     )
//!     .await?;
//!
//! if let Some(text) = response.text() {
//!     println!("{text}");
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Seam for grounded generation. Implemented by [`GeminiClient`];
/// consumers stub it in tests to avoid the network.
#[async_trait]
pub trait GroundedProvider: Send + Sync {
    /// Execute one generation request.
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse>;
}

#[async_trait]
impl<P: GroundedProvider + ?Sized> GroundedProvider for std::sync::Arc<P> {
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        (**self).generate(request).await
    }
}

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model to query (default: `gemini-2.5-flash`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate content.
    ///
    /// One outbound call, no retries. The payload is returned exactly as
    /// the provider sent it; interpreting its fields is the caller's job.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(api_error_message(status, &error_text)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            candidates = body.candidates.len(),
            "Gemini generate_content"
        );

        Ok(body)
    }
}

#[async_trait]
impl GroundedProvider for GeminiClient {
    async fn generate(&self, request: GenerateContentRequest) -> Result<GenerateContentResponse> {
        self.generate_content(request).await
    }
}

/// Pull the provider's own error message out of an error body when it has
/// the standard `{"error": {"message": ...}}` shape; otherwise fall back
/// to the raw body or the HTTP status.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let provider_message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        });

    match provider_message {
        Some(msg) if !msg.is_empty() => msg,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("Gemini API returned {status}"),
    }
}
