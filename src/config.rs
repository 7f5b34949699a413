//! Connector configuration supplied by the host

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::result::{AgentError, Result};

/// Which of the two poll operations an invocation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GetUserInformations,
    ActiveStreams,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetUserInformations => "get_user_informations",
            Action::ActiveStreams => "active_streams",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "get_user_informations" => Some(Action::GetUserInformations),
            "active_streams" => Some(Action::ActiveStreams),
            _ => None,
        }
    }
}

/// Statically validated connector configuration, resolved once per
/// invocation before dispatch. Field names on the wire match the host's
/// option names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub user_id: CompactString,
    pub client_id: CompactString,
    pub client_secret: CompactString,
    pub access_token: CompactString,
    /// Unset means the host never configured a mode; dispatch logs an
    /// error and completes without failure.
    #[serde(rename = "type", default)]
    pub action: Option<Action>,
    /// Verbose mode: log response bodies and inbound events
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub emit_events: bool,
    /// Maximum days without an emitted event before the connector is
    /// considered unhealthy
    pub expected_receive_period_in_days: i64,
}

impl AgentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("user_id", &self.user_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("access_token", &self.access_token),
        ] {
            if value.is_empty() {
                return Err(AgentError::config_validation(
                    field,
                    format!("{field} is a required field"),
                ));
            }
        }

        if self.expected_receive_period_in_days <= 0 {
            return Err(AgentError::config_validation(
                "expected_receive_period_in_days",
                "expected_receive_period_in_days must be a positive number of days",
            ));
        }

        Ok(())
    }

    /// Re-evaluate the configuration with an inbound event's fields
    /// substituted, for this invocation only.
    ///
    /// Only string fields with exactly matching option names override;
    /// anything else in the event is ignored. An unrecognized `type` value
    /// clears the action, which dispatch then reports as invalid.
    pub fn with_event(&self, event: &Value) -> AgentConfig {
        let mut config = self.clone();

        let Some(fields) = event.as_object() else {
            return config;
        };

        let overlay = |target: &mut CompactString, key: &str| {
            if let Some(value) = fields.get(key).and_then(Value::as_str) {
                *target = value.into();
            }
        };

        overlay(&mut config.user_id, "user_id");
        overlay(&mut config.client_id, "client_id");
        overlay(&mut config.client_secret, "client_secret");
        overlay(&mut config.access_token, "access_token");

        if let Some(action) = fields.get("type").and_then(Value::as_str) {
            config.action = Action::parse(action);
        }
        if let Some(debug) = fields.get("debug").and_then(Value::as_bool) {
            config.debug = debug;
        }
        if let Some(emit_events) = fields.get("emit_events").and_then(Value::as_bool) {
            config.emit_events = emit_events;
        }
        if let Some(days) = fields
            .get("expected_receive_period_in_days")
            .and_then(Value::as_i64)
        {
            config.expected_receive_period_in_days = days;
        }

        config
    }
}
