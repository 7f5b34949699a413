//! Trait seams toward the host automation engine
//!
//! The host owns credential encryption, the persistence engine behind the
//! key-value memory, and event routing; this crate only defines the
//! interfaces it calls through. The in-memory implementations back the test
//! suite and hosts without their own storage.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use compact_str::CompactString;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HostError {
    #[error("memory store error: {0}")]
    Memory(CompactString),

    #[error("credential store error: {0}")]
    Credentials(CompactString),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Host-managed secret storage. Used to persist a rotated access token
/// under a fixed logical name.
pub trait CredentialStore: Send + Sync {
    fn persist(&self, name: &str, value: &str) -> HostResult<()>;
}

/// Host-managed persistent key-value memory, keyed per connector instance.
pub trait Memory: Send + Sync {
    fn read(&self, key: &str) -> HostResult<Option<Value>>;
    fn write(&self, key: &str, value: Value) -> HostResult<()>;
}

/// Credential store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    writes: Mutex<Vec<(CompactString, CompactString)>>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value persisted under `name`
    pub fn get(&self, name: &str) -> Option<CompactString> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    /// Total number of persist calls
    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl CredentialStore for InMemoryCredentials {
    fn persist(&self, name: &str, value: &str) -> HostResult<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((name.into(), value.into()));
        Ok(())
    }
}

/// Key-value memory backed by a map
#[derive(Debug, Default)]
pub struct InMemoryMemory {
    entries: Mutex<HashMap<String, Value>>,
}

impl InMemoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Memory for InMemoryMemory {
    fn read(&self, key: &str) -> HostResult<Option<Value>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: Value) -> HostResult<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value);
        Ok(())
    }
}
