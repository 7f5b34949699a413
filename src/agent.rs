//! The connector itself: dispatch, the two fetchers, and health

use std::sync::{Arc, mpsc::Sender};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    client::{ClientConfig, HelixApi},
    config::{Action, AgentConfig},
    dispatcher::Dispatcher,
    event::AgentEvent,
    host::{CredentialStore, Memory},
    result::Result,
    stores::AgentState,
    token::TokenManager,
};

/// Polls the Twitch Helix API for user profile data or live-stream status
/// and emits normalized change events.
///
/// The host drives it via [`check`](Self::check) (scheduled) or
/// [`receive`](Self::receive) (event-driven); both resolve the
/// configuration, then dispatch to the selected fetcher, which ensures a
/// valid token first. Each invocation performs at most two outbound HTTP
/// calls, sequentially.
pub struct TwitchAgent {
    config: AgentConfig,
    api: HelixApi,
    state: AgentState,
    credentials: Arc<dyn CredentialStore>,
    sender: Sender<AgentEvent>,
}

impl TwitchAgent {
    pub fn new(
        config: AgentConfig,
        client_config: ClientConfig,
        memory: Arc<dyn Memory>,
        credentials: Arc<dyn CredentialStore>,
        sender: Sender<AgentEvent>,
    ) -> Result<Self> {
        config.validate()?;
        let api = HelixApi::new(client_config)?;

        Ok(Self {
            config,
            api,
            state: AgentState::new(memory),
            credentials,
            sender,
        })
    }

    /// Scheduled entry point
    #[instrument(skip(self))]
    pub async fn check(&self) -> Result<()> {
        let config = self.config.clone();
        config.validate()?;
        self.trigger_action(config).await
    }

    /// Event-driven entry point: for each inbound event, re-evaluate the
    /// configuration with that event's fields substituted, then run the
    /// same dispatch as [`check`](Self::check).
    #[instrument(skip(self, events), fields(event_count = events.len()))]
    pub async fn receive(&self, events: &[Value]) -> Result<()> {
        for event in events {
            if self.config.debug {
                debug!(event = %event, "Received event");
            } else {
                debug!("Received event");
            }

            let config = self.config.with_event(event);
            config.validate()?;
            self.trigger_action(config).await?;
        }
        Ok(())
    }

    /// True iff an event was produced within the expected receive period
    /// and no error was recorded since.
    pub fn is_healthy(&self) -> Result<bool> {
        let Some(last_event_at) = self.state.last_event_at()? else {
            return Ok(false);
        };

        let age_secs = Utc::now().timestamp() - last_event_at;
        let within_period = age_secs <= self.config.expected_receive_period_in_days * 86_400;

        let recent_error =
            matches!(self.state.last_error_at()?, Some(error_at) if error_at > last_event_at);

        Ok(within_period && !recent_error)
    }

    async fn trigger_action(&self, mut config: AgentConfig) -> Result<()> {
        let Some(action) = config.action else {
            error!("type has an invalid value");
            return Ok(());
        };

        let result = match action {
            Action::GetUserInformations => self.get_user_informations(&mut config).await,
            Action::ActiveStreams => self.active_streams(&mut config).await,
        };

        if let Err(e) = &result {
            error!(error = %e, action = action.as_str(), "Poll failed");
            self.state.mark_error(Utc::now().timestamp())?;
        }

        result
    }

    /// Fetch the user profile and emit one event if it changed
    #[instrument(skip(self, config), fields(user_id = %config.user_id))]
    async fn get_user_informations(&self, config: &mut AgentConfig) -> Result<()> {
        self.token_manager().ensure_valid_token(config).await?;

        let payload = self
            .api
            .get_user(&config.user_id, &config.client_id, &config.access_token)
            .await?;

        if config.debug {
            debug!(body = %serde_json::to_string(&payload).unwrap_or_default(), "Users response body");
        }

        let prior = self.state.last_user_snapshot()?;
        if prior.as_ref() == Some(&payload) {
            debug!("User profile unchanged");
            return Ok(());
        }

        self.state.set_last_user_snapshot(&payload)?;
        info!("User profile changed");

        if config.emit_events {
            self.emit(AgentEvent::UserInfo(payload))?;
        }
        Ok(())
    }

    /// Fetch live streams and emit one event per broadcast session not seen
    /// in the prior snapshot
    #[instrument(skip(self, config), fields(user_id = %config.user_id))]
    async fn active_streams(&self, config: &mut AgentConfig) -> Result<()> {
        self.token_manager().ensure_valid_token(config).await?;

        let payload = self
            .api
            .get_streams(&config.user_id, &config.client_id, &config.access_token)
            .await?;

        if config.debug {
            debug!(body = %serde_json::to_string(&payload).unwrap_or_default(), "Streams response body");
        }

        let prior = self.state.last_streams_snapshot()?;
        if prior.as_ref() == Some(&payload) {
            debug!("Stream status unchanged");
            return Ok(());
        }

        for record in payload.new_records(prior.as_ref()) {
            info!(stream_id = %record.id, started_at = %record.started_at, "New live stream session");
            if config.emit_events {
                self.emit(AgentEvent::StreamOnline(record.clone()))?;
            }
        }

        // The whole payload becomes the new baseline, not just the new
        // records.
        self.state.set_last_streams_snapshot(&payload)?;
        Ok(())
    }

    fn token_manager(&self) -> TokenManager<'_> {
        TokenManager::new(&self.api, &self.state, self.credentials.as_ref())
    }

    fn emit(&self, event: AgentEvent) -> Result<()> {
        debug!(event_type = event.variant_name(), "Emitting event");
        self.sender.dispatch(event);
        self.state.mark_event_emitted(Utc::now().timestamp())
    }
}
