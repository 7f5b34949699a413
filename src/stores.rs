use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    domain::{StreamsResponse, UserResponse},
    host::Memory,
    result::Result,
};

// Each persisted field lives under its own key. Snapshots and token expiry
// are independently typed; nothing shares a mutable blob.
const LAST_USER_SNAPSHOT: &str = "last_user_snapshot";
const LAST_STREAMS_SNAPSHOT: &str = "last_streams_snapshot";
const TOKEN_EXPIRES_AT: &str = "token_expires_at";
const LAST_EVENT_AT: &str = "last_event_at";
const LAST_ERROR_AT: &str = "last_error_at";

/// Typed facade over the host's key-value memory.
///
/// Entries are created lazily on first successful call and overwritten
/// wholly on change; deletion is a host-level memory-reset concern.
pub struct AgentState {
    memory: Arc<dyn Memory>,
}

impl AgentState {
    pub fn new(memory: Arc<dyn Memory>) -> Self {
        Self { memory }
    }

    pub fn last_user_snapshot(&self) -> Result<Option<UserResponse>> {
        self.get(LAST_USER_SNAPSHOT)
    }

    pub fn set_last_user_snapshot(&self, snapshot: &UserResponse) -> Result<()> {
        self.put(LAST_USER_SNAPSHOT, snapshot)
    }

    pub fn last_streams_snapshot(&self) -> Result<Option<StreamsResponse>> {
        self.get(LAST_STREAMS_SNAPSHOT)
    }

    pub fn set_last_streams_snapshot(&self, snapshot: &StreamsResponse) -> Result<()> {
        self.put(LAST_STREAMS_SNAPSHOT, snapshot)
    }

    /// Expiry of the current app access token, epoch seconds
    pub fn token_expires_at(&self) -> Result<Option<i64>> {
        self.get(TOKEN_EXPIRES_AT)
    }

    pub fn set_token_expires_at(&self, epoch_secs: i64) -> Result<()> {
        self.put(TOKEN_EXPIRES_AT, &epoch_secs)
    }

    pub fn last_event_at(&self) -> Result<Option<i64>> {
        self.get(LAST_EVENT_AT)
    }

    pub fn mark_event_emitted(&self, epoch_secs: i64) -> Result<()> {
        self.put(LAST_EVENT_AT, &epoch_secs)
    }

    pub fn last_error_at(&self) -> Result<Option<i64>> {
        self.get(LAST_ERROR_AT)
    }

    pub fn mark_error(&self, epoch_secs: i64) -> Result<()> {
        self.put(LAST_ERROR_AT, &epoch_secs)
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.memory.read(key)? {
            Some(value) => match serde_json::from_value(value) {
                Ok(decoded) => Ok(Some(decoded)),
                Err(e) => {
                    // Treat an unreadable entry like a host memory reset;
                    // the next successful fetch re-seeds it.
                    warn!(key = %key, error = %e, "Discarding unreadable memory entry");
                    Ok(None)
                },
            },
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.memory.write(key, serde_json::to_value(value)?)?;
        Ok(())
    }
}
