// src/client.rs

use crate::config::{ClientConfig, ConfigValidator};
use crate::core::{preview_key, ApiKeys, CredentialSet, KeySelector, RotationPolicy};
use crate::endpoints::{
    Endpoint, HistoryOptions, TopOptions, DEFAULT_HOLDERS_LIMIT, DEFAULT_PRICE_HISTORY_PERIOD,
    DEFAULT_TRANSACTIONS_LIMIT,
};
use crate::error::Result;
use crate::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ethplorer API client that spreads requests over several API keys.
///
/// Every call picks exactly one key, builds the URL, performs a single GET and
/// returns the JSON body untouched. Errors from the transport are returned as
/// they are, without retries.
///
/// ```no_run
/// # async fn demo() -> ethplorer_client::Result<()> {
/// use ethplorer_client::{EthplorerClient, RotationPolicy};
///
/// let client = EthplorerClient::new(vec!["key-1", "key-2"], RotationPolicy::Sequential)?;
/// let block = client.get_last_block().await?;
/// println!("{block}");
/// # Ok(())
/// # }
/// ```
pub struct EthplorerClient {
    selector: KeySelector,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl EthplorerClient {
    /// Builds a client against the production API with the default transport.
    pub fn new(api_keys: impl Into<ApiKeys>, policy: RotationPolicy) -> Result<Self> {
        let credentials = CredentialSet::new(api_keys)?;
        let transport = HttpTransport::new(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)?;
        Ok(Self::with_transport(
            credentials,
            policy,
            crate::config::DEFAULT_BASE_URL,
            Arc::new(transport),
        ))
    }

    /// Builds a client from a validated [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        ConfigValidator::validate(config)?;
        let credentials = CredentialSet::new(config.api_keys.clone())?;
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(
            credentials,
            config.policy(),
            &config.normalized_base_url(),
            Arc::new(transport),
        ))
    }

    /// Builds a client on top of a caller-provided transport.
    pub fn with_transport(
        credentials: CredentialSet,
        policy: RotationPolicy,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Self {
        debug!(
            credentials = credentials.len(),
            rotation_method = policy.as_str(),
            base_url,
            "Ethplorer client created"
        );
        Self {
            selector: KeySelector::new(credentials, policy),
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            transport,
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.selector.policy()
    }

    pub fn credential_count(&self) -> usize {
        self.selector.credentials().len()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Selects a key and returns the URL the next request for `endpoint`
    /// would use. Advances the rotation like a real request does.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        let api_key = self.selector.select_credential();
        endpoint.url(&self.base_url, api_key.expose_secret())
    }

    /// Performs `endpoint` and returns the decoded JSON payload.
    #[instrument(level = "debug", skip_all, fields(endpoint = endpoint.name()))]
    pub async fn request(&self, endpoint: Endpoint) -> Result<Value> {
        let api_key = self.selector.select_credential();
        let url = endpoint.url(&self.base_url, api_key.expose_secret());

        debug!(
            path = %endpoint.path(),
            api_key.preview = %preview_key(api_key.expose_secret()),
            "Sending request to Ethplorer"
        );

        self.transport.get_json(&url).await.map_err(|e| {
            e.log(endpoint.name());
            e
        })
    }

    /// Last block number known to the API.
    pub async fn get_last_block(&self) -> Result<Value> {
        self.request(Endpoint::LastBlock).await
    }

    pub async fn get_token_info(&self, token: &str) -> Result<Value> {
        self.request(Endpoint::TokenInfo {
            token: token.to_string(),
        })
        .await
    }

    pub async fn get_address_info(&self, address: &str) -> Result<Value> {
        self.request(Endpoint::AddressInfo {
            address: address.to_string(),
        })
        .await
    }

    pub async fn get_tx_info(&self, hash: &str) -> Result<Value> {
        self.request(Endpoint::TxInfo {
            hash: hash.to_string(),
        })
        .await
    }

    /// Operations on a token; defaults to the last 10 transfers.
    pub async fn get_token_history(&self, token: &str, options: HistoryOptions) -> Result<Value> {
        self.request(Endpoint::TokenHistory {
            token: token.to_string(),
            options,
        })
        .await
    }

    /// Token operations of an address; defaults to the last 10 transfers.
    pub async fn get_address_history(
        &self,
        address: &str,
        options: HistoryOptions,
    ) -> Result<Value> {
        self.request(Endpoint::AddressHistory {
            address: address.to_string(),
            options,
        })
        .await
    }

    /// Ether transactions of an address. `None` means 10.
    pub async fn get_address_transactions(
        &self,
        address: &str,
        limit: Option<u32>,
    ) -> Result<Value> {
        self.request(Endpoint::AddressTransactions {
            address: address.to_string(),
            limit: limit.unwrap_or(DEFAULT_TRANSACTIONS_LIMIT),
        })
        .await
    }

    /// Top tokens ranked by `criteria` (default `cap`, 50 entries).
    pub async fn get_top(&self, options: TopOptions) -> Result<Value> {
        self.request(Endpoint::Top(options)).await
    }

    pub async fn get_top_tokens(&self) -> Result<Value> {
        self.request(Endpoint::TopTokens).await
    }

    /// Largest holders of a token. `None` means 100.
    pub async fn get_top_token_holders(&self, token: &str, limit: Option<u32>) -> Result<Value> {
        self.request(Endpoint::TopTokenHolders {
            token: token.to_string(),
            limit: limit.unwrap_or(DEFAULT_HOLDERS_LIMIT),
        })
        .await
    }

    /// Token operation counts grouped by day.
    pub async fn get_token_history_grouped(&self, token: &str) -> Result<Value> {
        self.request(Endpoint::TokenHistoryGrouped {
            token: token.to_string(),
        })
        .await
    }

    /// Daily token prices over `period` days. `None` means 365.
    pub async fn get_token_price_history_grouped(
        &self,
        token: &str,
        period: Option<u32>,
    ) -> Result<Value> {
        self.request(Endpoint::TokenPriceHistoryGrouped {
            token: token.to_string(),
            period: period.unwrap_or(DEFAULT_PRICE_HISTORY_PERIOD),
        })
        .await
    }
}

impl fmt::Debug for EthplorerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthplorerClient")
            .field("selector", &self.selector)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
