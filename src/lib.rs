// src/lib.rs

//! Async client for the [Ethplorer](https://ethplorer.io) API.
//!
//! Requests are spread over one or more API keys, either round-robin or at
//! random. Responses come back as raw `serde_json::Value`s; nothing is parsed
//! or retried.

// --- Modules ---
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod endpoints;
pub mod error;
pub mod transport;

// Re-export key types for convenience
pub use client::EthplorerClient;
pub use config::ClientConfig;
pub use crate::core::{ApiKeys, CredentialSet, KeySelector, RotationPolicy};
pub use endpoints::{Endpoint, HistoryOptions, TopOptions};
pub use error::{AppError, Result};
pub use transport::{HttpTransport, Transport};
