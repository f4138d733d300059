// src/config/validation.rs

use crate::config::ClientConfig;
use crate::core::preview_key;
use crate::error::{AppError, Result};
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &ClientConfig) -> Result<()> {
        debug!("Starting configuration validation");

        if let Err(e) = Self::validate_keys(config) {
            warn!("API key validation failed: {}", e);
            return Err(e);
        }

        if let Err(e) = Self::validate_transport(config) {
            warn!("Transport config validation failed: {}", e);
            return Err(e);
        }

        debug!("Configuration validation completed successfully");
        Ok(())
    }

    fn validate_keys(config: &ClientConfig) -> Result<()> {
        if config.api_keys.is_empty() {
            return Err(AppError::invalid_configuration(
                "At least one API key must be configured",
                Some("api_keys"),
            ));
        }

        let mut seen = HashSet::new();
        for (position, key) in config.api_keys.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(AppError::invalid_configuration(
                    format!("API key at position {position} is empty"),
                    Some("api_keys"),
                ));
            }
            // Duplicates only skew the rotation, they do not break it.
            if !seen.insert(key) {
                warn!(
                    api_key.preview = %preview_key(key),
                    "Duplicate API key configured; it will be used more often than the others"
                );
            }
        }

        debug!("Validated {} API keys", config.api_keys.len());
        Ok(())
    }

    fn validate_transport(config: &ClientConfig) -> Result<()> {
        let url = Url::parse(&config.base_url).map_err(|e| {
            AppError::invalid_configuration(
                format!("Invalid URL in base_url: {} - {}", config.base_url, e),
                Some("base_url"),
            )
        })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(AppError::invalid_configuration(
                    format!("Unsupported base_url scheme '{scheme}'. Supported: http, https"),
                    Some("base_url"),
                ))
            }
        }

        if config.request_timeout_secs == 0 {
            return Err(AppError::invalid_configuration(
                "Request timeout cannot be 0",
                Some("request_timeout_secs"),
            ));
        }

        Ok(())
    }
}
