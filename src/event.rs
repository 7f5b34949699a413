use serde_json::Value;

use crate::domain::{StreamRecord, UserResponse};

/// Outbound events handed to the host's event system.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// The user profile payload changed; carries the full parsed body
    UserInfo(UserResponse),
    /// A broadcast session not seen in the prior snapshot; carries that
    /// single stream record
    StreamOnline(StreamRecord),
}

impl AgentEvent {
    /// Get the variant name as a string slice (without "AgentEvent::" prefix)
    pub fn variant_name(&self) -> &'static str {
        match self {
            AgentEvent::UserInfo(_) => "UserInfo",
            AgentEvent::StreamOnline(_) => "StreamOnline",
        }
    }

    /// The event payload as host-facing JSON
    pub fn payload(&self) -> Value {
        match self {
            AgentEvent::UserInfo(payload) => serde_json::to_value(payload).unwrap_or_default(),
            AgentEvent::StreamOnline(record) => serde_json::to_value(record).unwrap_or_default(),
        }
    }
}

impl From<UserResponse> for AgentEvent {
    fn from(payload: UserResponse) -> Self {
        AgentEvent::UserInfo(payload)
    }
}

impl From<StreamRecord> for AgentEvent {
    fn from(record: StreamRecord) -> Self {
        AgentEvent::StreamOnline(record)
    }
}
