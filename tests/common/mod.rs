//! Common test utilities and fixtures

#![allow(dead_code)]

use ethplorer_client::{
    config::ClientConfig, CredentialSet, EthplorerClient, HttpTransport, RotationPolicy,
};
use std::{sync::Arc, time::Duration};

pub const TEST_USER_AGENT: &str = "ethplorer-client-tests/1.0";

/// Test configuration builder
pub struct TestConfigBuilder {
    config: ClientConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let mut keys = std::mem::take(&mut self.config.api_keys).into_vec();
        keys.push(key.into());
        self.config.api_keys = keys.into();
        self
    }

    pub fn with_random_keys(mut self) -> Self {
        self.config.random_keys = true;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock HTTP server standing in for api.ethplorer.io
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    pub async fn start() -> Self {
        Self {
            server: wiremock::MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client pointed at this server with a short timeout.
    pub fn client(&self, keys: &[&str], policy: RotationPolicy, timeout: Duration) -> EthplorerClient {
        let transport = HttpTransport::new(timeout, TEST_USER_AGENT).expect("transport");
        EthplorerClient::with_transport(
            CredentialSet::new(keys.to_vec()).expect("credentials"),
            policy,
            &self.uri(),
            Arc::new(transport),
        )
    }
}
