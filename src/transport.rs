// src/transport.rs

use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `User-Agent` sent with every request unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("ethplorer-client/", env!("CARGO_PKG_VERSION"));

/// Performs a GET and hands back the decoded JSON body.
///
/// Implementations must not retry and must return failures as they occurred.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// `reqwest`-backed transport: `Accept: application/json`, fixed user agent,
/// single request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::invalid_configuration(
                    format!("Failed to build HTTP client: {e}"),
                    None::<String>,
                )
            })?;

        debug!(timeout = ?timeout, user_agent, "HTTP transport created");
        Ok(Self { client, timeout })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        trace!(status = %response.status(), "Received response from Ethplorer");
        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}
