//! Error types for the Helix HTTP client

use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error from {endpoint}: {message}")]
    JsonParse {
        endpoint: String,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    /// Non-success response from Twitch. 4xx and 5xx are deliberately not
    /// distinguished: both carry the status code and body and both leave
    /// any stored snapshot untouched.
    #[error("Helix API error: HTTP {status}: {message}")]
    HelixApi { status: u16, message: CompactString },

    #[error("Configuration error: {0}")]
    Config(CompactString),

    #[error("Invalid configuration: {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Authentication failed")]
    Authentication,
}

impl ClientError {
    /// Create a JSON parse error with endpoint context
    pub fn json_parse(
        endpoint: impl Into<String>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse { endpoint: endpoint.into(), message: message.into(), source }
    }

    /// Create an API error from a response status and body
    pub fn helix_api(status: u16, message: impl Into<CompactString>) -> Self {
        Self::HelixApi { status, message: message.into() }
    }

    /// Create a general configuration error
    pub fn config(message: impl Into<CompactString>) -> Self {
        Self::Config(message.into())
    }

    /// Create a configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }
}
