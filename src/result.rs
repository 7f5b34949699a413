use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

use crate::{client::ClientError, host::HostError};

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("Invalid configuration: {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Memory store error: {0}")]
    Memory(CompactString),

    #[error("Credential store error: {0}")]
    Credentials(CompactString),

    #[error("{0}")]
    GeneralError(CompactString),
}

impl From<ClientError> for AgentError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Http(e) => AgentError::GeneralError(format!("HTTP error: {e}").into()),
            ClientError::JsonParse { endpoint, message, .. } => AgentError::GeneralError(
                format!("JSON parse error from {endpoint}: {message}").into(),
            ),
            ClientError::HelixApi { status, message } => {
                AgentError::GeneralError(format!("HTTP {status}: {message}").into())
            },
            ClientError::Config(msg) => AgentError::GeneralError(msg),
            ClientError::ConfigValidation { field, message } => {
                AgentError::config_validation(field, message)
            },
            ClientError::Authentication => {
                AgentError::GeneralError("Authentication failed".into())
            },
        }
    }
}

impl From<HostError> for AgentError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::Memory(msg) => AgentError::Memory(msg),
            HostError::Credentials(msg) => AgentError::Credentials(msg),
        }
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(e: serde_json::Error) -> Self {
        AgentError::GeneralError(e.to_compact_string())
    }
}

impl AgentError {
    /// Create a configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }
}
