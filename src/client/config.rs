//! Configuration for the Helix HTTP client

use std::time::Duration;

use compact_str::CompactString;

use super::error::{ClientError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitch.tv/helix";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://id.twitch.tv";

/// Endpoint and request configuration for [`super::HelixApi`].
///
/// The base URLs are overridable so embedding hosts can point the connector
/// at a proxy or a mock server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for Helix data endpoints
    pub api_base_url: CompactString,
    /// Base URL for the OAuth token endpoint
    pub auth_base_url: CompactString,
    /// Request timeout, bounded so a stalled call cannot hang the host's
    /// scheduler
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("auth_base_url", &self.auth_base_url),
        ] {
            if value.is_empty() {
                return Err(ClientError::config_validation(field, "URL cannot be empty"));
            }

            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ClientError::config_validation(
                    field,
                    "URL must start with http:// or https://",
                ));
            }

            if url::Url::parse(value).is_err() {
                return Err(ClientError::config_validation(
                    field,
                    "URL is not a valid URL format",
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(ClientError::config_validation(
                "timeout",
                "Timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Set the Helix data base URL
    pub fn with_api_base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the OAuth base URL
    pub fn with_auth_base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.auth_base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
