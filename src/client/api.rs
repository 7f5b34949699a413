//! Core HTTP client for the Twitch Helix API

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result},
};
use crate::domain::{StreamsResponse, TokenResponse, UserResponse};

/// Pure HTTP client for the two Helix endpoints this connector consumes,
/// plus the OAuth token endpoint.
#[derive(Debug)]
pub struct HelixApi {
    client: Client,
    config: ClientConfig,
}

impl HelixApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Get a user profile, filtered by user id
    #[instrument(skip(self, client_id, access_token), fields(user_id = %user_id))]
    pub async fn get_user(
        &self,
        user_id: &str,
        client_id: &str,
        access_token: &str,
    ) -> Result<UserResponse> {
        let url = format!("{}/users?id={user_id}", self.config.api_base_url);
        self.get_json(&url, client_id, access_token).await
    }

    /// Get the currently live streams for a user
    #[instrument(skip(self, client_id, access_token), fields(user_id = %user_id))]
    pub async fn get_streams(
        &self,
        user_id: &str,
        client_id: &str,
        access_token: &str,
    ) -> Result<StreamsResponse> {
        let url = format!("{}/streams?user_id={user_id}", self.config.api_base_url);
        self.get_json(&url, client_id, access_token).await
    }

    /// Request an app access token via the client credentials grant
    #[instrument(skip(self, client_id, client_secret))]
    pub async fn fetch_app_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        let url = format!("{}/oauth2/token", self.config.auth_base_url);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform an authenticated GET request and deserialize the JSON response
    async fn get_json<T>(&self, url: &str, client_id: &str, access_token: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {access_token}"))
            .header("Client-Id", client_id)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an HTTP response and deserialize the JSON body
    async fn handle_response<T>(&self, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let endpoint = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;

        debug!(endpoint = %endpoint, status = status.as_u16(), "Request status");

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| {
                warn!(endpoint = %endpoint, error = %e, "Failed to parse response body");
                ClientError::json_parse(endpoint, "Failed to parse response", e)
            })
        } else {
            // 4xx and 5xx are handled alike: log with status and body,
            // surface as an API error, leave any stored snapshot alone.
            warn!(endpoint = %endpoint, status = status.as_u16(), body = %body, "Helix request failed");
            Err(ClientError::helix_api(status.as_u16(), body))
        }
    }
}
