//! Helix client modules
//!
//! A small, testable HTTP client for the two Helix endpoints this connector
//! polls and the OAuth token endpoint, split into focused components.

pub mod api;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use api::HelixApi;
pub use config::ClientConfig;
pub use error::ClientError;

pub type Result<T> = std::result::Result<T, ClientError>;
