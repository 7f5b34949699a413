//! App access token upkeep

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::{
    client::HelixApi,
    config::AgentConfig,
    host::CredentialStore,
    result::Result,
    stores::AgentState,
};

/// Logical name the rotated access token is persisted under in the host's
/// credential storage.
pub const ACCESS_TOKEN_CREDENTIAL: &str = "twitch_access_token";

/// Refresh when less than this many seconds remain on the stored expiry.
const REFRESH_THRESHOLD_SECS: i64 = 2 * 3600;

/// Ensures a valid OAuth bearer token is available before an authenticated
/// call, refreshing it via the client credentials grant when near expiry.
pub struct TokenManager<'a> {
    api: &'a HelixApi,
    state: &'a AgentState,
    credentials: &'a dyn CredentialStore,
}

impl<'a> TokenManager<'a> {
    pub fn new(
        api: &'a HelixApi,
        state: &'a AgentState,
        credentials: &'a dyn CredentialStore,
    ) -> Self {
        Self { api, state, credentials }
    }

    /// Refresh the access token if the stored expiry is absent or within
    /// two hours, rotating `config.access_token` in place.
    ///
    /// A rotated token is persisted to the credential store exactly once;
    /// an unchanged token is not persisted. The stored expiry is only
    /// written after a successful refresh.
    #[instrument(skip(self, config))]
    pub async fn ensure_valid_token(&self, config: &mut AgentConfig) -> Result<()> {
        let now = Utc::now().timestamp();

        match self.state.token_expires_at()? {
            Some(expires_at) => {
                let remaining_secs = expires_at - now;
                if remaining_secs >= REFRESH_THRESHOLD_SECS {
                    debug!(remaining_secs, "Token refresh not needed");
                    return Ok(());
                }
                debug!(remaining_secs, "Token near expiry, refreshing");
            },
            None => debug!("No stored token expiry, refreshing"),
        }

        let token = self
            .api
            .fetch_app_token(&config.client_id, &config.client_secret)
            .await?;

        self.state.set_token_expires_at(now + token.expires_in)?;

        if token.access_token != config.access_token {
            self.credentials
                .persist(ACCESS_TOKEN_CREDENTIAL, &token.access_token)?;
            info!(expires_in_secs = token.expires_in, "Rotated Twitch access token");
            config.access_token = token.access_token;
        } else {
            debug!("Refreshed token is unchanged");
        }

        Ok(())
    }
}
