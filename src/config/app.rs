// src/config/app.rs

use crate::core::{ApiKeys, RotationPolicy};
use crate::transport::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};

/// Production Ethplorer endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ethplorer.io/";

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct ClientConfig {
    /// One key or a list of keys.
    #[serde(default)]
    pub api_keys: ApiKeys,
    /// Pick keys at random instead of round-robin.
    #[serde(default)]
    pub random_keys: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            random_keys: false,
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_keys: impl Into<ApiKeys>) -> Self {
        Self {
            api_keys: api_keys.into(),
            ..Self::default()
        }
    }

    pub fn with_random_keys(mut self, random_keys: bool) -> Self {
        self.random_keys = random_keys;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn policy(&self) -> RotationPolicy {
        RotationPolicy::from_random_flag(self.random_keys)
    }

    /// Base URL with exactly one trailing slash.
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
