//! Environment-based configuration overrides

use std::env;
use tracing::warn;

pub const ENV_API_KEYS: &str = "ETHPLORER_API_KEYS";
pub const ENV_RANDOM_KEYS: &str = "ETHPLORER_RANDOM_KEYS";
pub const ENV_BASE_URL: &str = "ETHPLORER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ETHPLORER_TIMEOUT_SECS";

/// Values read from the environment that override file-based config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentConfig {
    pub api_keys: Option<Vec<String>>,
    pub random_keys: Option<bool>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl EnvironmentConfig {
    /// Load overrides from environment variables
    pub fn from_env() -> Self {
        Self {
            api_keys: env::var(ENV_API_KEYS).ok().map(|s| split_keys(&s)),
            random_keys: env::var(ENV_RANDOM_KEYS)
                .ok()
                .and_then(|s| parse_flag(ENV_RANDOM_KEYS, &s)),
            base_url: env::var(ENV_BASE_URL).ok().filter(|s| !s.trim().is_empty()),
            request_timeout_secs: env::var(ENV_TIMEOUT_SECS)
                .ok()
                .and_then(|s| match s.trim().parse() {
                    Ok(secs) => Some(secs),
                    Err(_) => {
                        warn!("Invalid {} environment variable: {}", ENV_TIMEOUT_SECS, s);
                        None
                    }
                }),
        }
    }

    /// Check if any environment overrides are present
    pub fn has_overrides(&self) -> bool {
        self.api_keys.is_some()
            || self.random_keys.is_some()
            || self.base_url.is_some()
            || self.request_timeout_secs.is_some()
    }

    /// Names of the variables that are set
    pub fn override_summary(&self) -> Vec<&'static str> {
        let mut overrides = Vec::new();
        if self.api_keys.is_some() {
            overrides.push(ENV_API_KEYS);
        }
        if self.random_keys.is_some() {
            overrides.push(ENV_RANDOM_KEYS);
        }
        if self.base_url.is_some() {
            overrides.push(ENV_BASE_URL);
        }
        if self.request_timeout_secs.is_some() {
            overrides.push(ENV_TIMEOUT_SECS);
        }
        overrides
    }
}

/// Splits a comma-separated key list, dropping blanks.
pub fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(name: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!("Invalid {} environment variable: {}", name, raw);
            None
        }
    }
}
