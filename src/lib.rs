//! A polling connector for the Twitch Helix API.
//!
//! Periodically queries Helix for user profile data or live-stream status,
//! diffs the result against a previously stored snapshot, conditionally
//! refreshes the OAuth app access token, and emits normalized change
//! events. Scheduling, credential storage, event routing, and the
//! persistence engine belong to the embedding host; this crate talks to
//! them through the [`host`] traits and the [`dispatcher::Dispatcher`]
//! seam.
//!
//! ```no_run
//! use std::sync::{Arc, mpsc};
//!
//! use twitch_agent::{
//!     Action, AgentConfig, ClientConfig, InMemoryCredentials, InMemoryMemory, TwitchAgent,
//! };
//!
//! # async fn run() -> twitch_agent::Result<()> {
//! let config = AgentConfig {
//!     user_id: "187039841".into(),
//!     client_id: "my-client-id".into(),
//!     client_secret: "my-client-secret".into(),
//!     access_token: "my-app-token".into(),
//!     action: Some(Action::ActiveStreams),
//!     debug: false,
//!     emit_events: true,
//!     expected_receive_period_in_days: 2,
//! };
//!
//! let (tx, rx) = mpsc::channel();
//! let agent = TwitchAgent::new(
//!     config,
//!     ClientConfig::default(),
//!     Arc::new(InMemoryMemory::new()),
//!     Arc::new(InMemoryCredentials::new()),
//!     tx,
//! )?;
//!
//! agent.check().await?;
//! for event in rx.try_iter() {
//!     println!("{}", event.payload());
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod event;
pub mod host;
pub mod result;
pub mod stores;
pub mod token;

pub use agent::TwitchAgent;
pub use client::{ClientConfig, ClientError, HelixApi};
pub use config::{Action, AgentConfig};
pub use event::AgentEvent;
pub use host::{CredentialStore, InMemoryCredentials, InMemoryMemory, Memory};
pub use result::{AgentError, Result};
pub use stores::AgentState;
pub use token::{ACCESS_TOKEN_CREDENTIAL, TokenManager};
