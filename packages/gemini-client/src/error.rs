//! Error types for the Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, quota, malformed request)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// The message carried by the error, without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Config(msg) | Self::Network(msg) | Self::Api(msg) | Self::Parse(msg) => msg,
        }
    }
}
