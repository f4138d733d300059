// src/config/loader.rs

use crate::config::{ClientConfig, ConfigValidator, EnvironmentConfig};
use crate::core::ApiKeys;
use crate::error::{AppError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Load configuration from file and environment variables, then validate it
pub fn load_config(config_path: &Path) -> Result<ClientConfig> {
    let config = read_config(config_path)?;

    // Validate the final configuration
    ConfigValidator::validate(&config)?;

    debug!("Configuration loaded and validated successfully");
    Ok(config)
}

/// Reads the file (if present) and applies environment overrides without
/// validating, so callers can layer further overrides first.
pub fn read_config(config_path: &Path) -> Result<ClientConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!("Configuration file not found, using defaults");
        ClientConfig::default()
    };

    // Override with environment variables
    apply_overrides(&mut config, EnvironmentConfig::from_env());
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|_| AppError::ConfigNotFound {
        path: config_path.display().to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
        message: format!("Failed to parse config file: {e}"),
        line: e.location().map(|loc| loc.line()),
    })
}

/// Applies environment overrides on top of `config`.
pub fn apply_overrides(config: &mut ClientConfig, env: EnvironmentConfig) {
    if env.has_overrides() {
        debug!(overrides = ?env.override_summary(), "Applying environment overrides");
    }

    if let Some(keys) = env.api_keys {
        info!("Overriding API keys from environment variable ({} keys)", keys.len());
        config.api_keys = ApiKeys::Many(keys);
    }

    if let Some(random_keys) = env.random_keys {
        info!("Overriding key rotation mode from environment: random={}", random_keys);
        config.random_keys = random_keys;
    }

    if let Some(base_url) = env.base_url {
        info!("Overriding base URL from environment: {}", base_url);
        config.base_url = base_url;
    }

    if let Some(secs) = env.request_timeout_secs {
        info!("Overriding request timeout from environment: {}s", secs);
        config.request_timeout_secs = secs;
    }
}

/// Save configuration to file
pub async fn save_config(config: &ClientConfig, config_path: &Path) -> Result<()> {
    let yaml_content = serde_yaml::to_string(config).map_err(|e| AppError::Serialization {
        message: format!("Failed to serialize config: {e}"),
    })?;

    tokio::fs::write(config_path, yaml_content)
        .await
        .map_err(|e| AppError::Io {
            operation: "write_config".to_string(),
            message: format!("Failed to write config file: {e}"),
        })?;

    info!("Configuration saved to: {}", config_path.display());
    Ok(())
}
