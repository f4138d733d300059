//! Error handling for the Ethplorer client
//!
//! The client surfaces two kinds of failure:
//! - configuration problems, detected at construction and fatal
//! - transport failures, passed through from the HTTP layer unchanged
//!
//! The remaining variants belong to the configuration loader and the CLI.

pub mod types;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String, field: Option<String> },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String, line: Option<usize> },

    // HTTP and network errors
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // System errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO operation failed: {operation} - {message}")]
    Io { operation: String, message: String },
}

impl AppError {
    /// Create a new invalid configuration error
    pub fn invalid_configuration(
        message: impl Into<String>,
        field: Option<impl Into<String>>,
    ) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
            field: field.map(Into::into),
        }
    }

    /// Returns `true` if the request timed out before a response arrived.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Upstream HTTP status, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Short machine-readable category, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. } => "configuration",
            Self::Transport(_) => "transport",
            Self::Serialization { .. } => "serialization",
            Self::Io { .. } => "io",
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self, operation: &str) {
        match self {
            Self::Transport(_) => {
                warn!(
                    error = %self,
                    error.kind = self.kind(),
                    http.status_code = self.status().map(|s| s.as_u16()),
                    timeout = self.is_timeout(),
                    operation,
                    "Request to Ethplorer failed"
                );
            }
            _ => {
                error!(
                    error = %self,
                    error.kind = self.kind(),
                    operation,
                    "Client error occurred"
                );
            }
        }
    }
}

/// Result type alias for the crate
pub type Result<T, E = AppError> = std::result::Result<T, E>;
