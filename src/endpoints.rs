// src/endpoints.rs

//! Ethplorer endpoint catalogue and URL construction.
//!
//! Path parameters are inserted exactly as given: no percent-encoding and no
//! format checks. Query parameters follow `apiKey` in a fixed order.

use std::fmt::Write;

/// Default `type` filter for the history endpoints.
pub const DEFAULT_HISTORY_TYPE: &str = "transfer";
/// Default `limit` for token and address history.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
/// Default `limit` for the address transaction list.
pub const DEFAULT_TRANSACTIONS_LIMIT: u32 = 10;
/// Default ranking criteria for `getTop`.
pub const DEFAULT_TOP_CRITERIA: &str = "cap";
/// Default `limit` for `getTop`.
pub const DEFAULT_TOP_LIMIT: u32 = 50;
/// Default `limit` for the top holders of a token.
pub const DEFAULT_HOLDERS_LIMIT: u32 = 100;
/// Default `period`, in days, for grouped price history.
pub const DEFAULT_PRICE_HISTORY_PERIOD: u32 = 365;

/// Options for `getTokenHistory` and `getAddressHistory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Operation type filter, sent as `type`.
    pub kind: String,
    pub limit: u32,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            kind: DEFAULT_HISTORY_TYPE.to_string(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl HistoryOptions {
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Options for `getTop`.
///
/// `criteria` is passed through as-is; the API decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopOptions {
    pub criteria: String,
    pub limit: u32,
}

impl Default for TopOptions {
    fn default() -> Self {
        Self {
            criteria: DEFAULT_TOP_CRITERIA.to_string(),
            limit: DEFAULT_TOP_LIMIT,
        }
    }
}

impl TopOptions {
    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = criteria.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// One request against the Ethplorer API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    LastBlock,
    TokenInfo { token: String },
    AddressInfo { address: String },
    TxInfo { hash: String },
    TokenHistory { token: String, options: HistoryOptions },
    AddressHistory { address: String, options: HistoryOptions },
    AddressTransactions { address: String, limit: u32 },
    Top(TopOptions),
    TopTokens,
    TopTokenHolders { token: String, limit: u32 },
    TokenHistoryGrouped { token: String },
    TokenPriceHistoryGrouped { token: String, period: u32 },
}

impl Endpoint {
    /// API method name, also used as the operation name in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LastBlock => "getLastBlock",
            Self::TokenInfo { .. } => "getTokenInfo",
            Self::AddressInfo { .. } => "getAddressInfo",
            Self::TxInfo { .. } => "getTxInfo",
            Self::TokenHistory { .. } => "getTokenHistory",
            Self::AddressHistory { .. } => "getAddressHistory",
            Self::AddressTransactions { .. } => "getAddressTransactions",
            Self::Top(_) => "getTop",
            Self::TopTokens => "getTopTokens",
            Self::TopTokenHolders { .. } => "getTopTokenHolders",
            Self::TokenHistoryGrouped { .. } => "getTokenHistoryGrouped",
            Self::TokenPriceHistoryGrouped { .. } => "getTokenPriceHistoryGrouped",
        }
    }

    /// Path relative to the base address, parameter substituted.
    pub fn path(&self) -> String {
        match self {
            Self::LastBlock | Self::Top(_) => self.name().to_string(),
            Self::TopTokens => format!("{}/", self.name()),
            Self::TokenInfo { token }
            | Self::TokenHistory { token, .. }
            | Self::TopTokenHolders { token, .. }
            | Self::TokenHistoryGrouped { token }
            | Self::TokenPriceHistoryGrouped { token, .. } => format!("{}/{token}", self.name()),
            Self::AddressInfo { address }
            | Self::AddressHistory { address, .. }
            | Self::AddressTransactions { address, .. } => format!("{}/{address}", self.name()),
            Self::TxInfo { hash } => format!("{}/{hash}", self.name()),
        }
    }

    /// Query parameters that follow `apiKey`, in order.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::TokenHistory { options, .. } | Self::AddressHistory { options, .. } => vec![
                ("type", options.kind.clone()),
                ("limit", options.limit.to_string()),
            ],
            Self::AddressTransactions { limit, .. } | Self::TopTokenHolders { limit, .. } => {
                vec![("limit", limit.to_string())]
            }
            Self::Top(options) => vec![
                ("criteria", options.criteria.clone()),
                ("limit", options.limit.to_string()),
            ],
            Self::TokenPriceHistoryGrouped { period, .. } => {
                vec![("period", period.to_string())]
            }
            Self::LastBlock
            | Self::TokenInfo { .. }
            | Self::AddressInfo { .. }
            | Self::TxInfo { .. }
            | Self::TopTokens
            | Self::TokenHistoryGrouped { .. } => Vec::new(),
        }
    }

    /// Full request URL. `base_url` must end with `/`.
    pub fn url(&self, base_url: &str, api_key: &str) -> String {
        let mut url = format!("{base_url}{}?apiKey={api_key}", self.path());
        for (name, value) in self.query() {
            // Writing into a String cannot fail.
            let _ = write!(url, "&{name}={value}");
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "https://api.ethplorer.io/";

    #[rstest]
    #[case(Endpoint::LastBlock, "getLastBlock?apiKey=K")]
    #[case(Endpoint::TokenInfo { token: "0xT".into() }, "getTokenInfo/0xT?apiKey=K")]
    #[case(Endpoint::AddressInfo { address: "0xA".into() }, "getAddressInfo/0xA?apiKey=K")]
    #[case(Endpoint::TxInfo { hash: "0xH".into() }, "getTxInfo/0xH?apiKey=K")]
    #[case(
        Endpoint::TokenHistory { token: "0xT".into(), options: HistoryOptions::default() },
        "getTokenHistory/0xT?apiKey=K&type=transfer&limit=10"
    )]
    #[case(
        Endpoint::AddressHistory { address: "0xA".into(), options: HistoryOptions::default() },
        "getAddressHistory/0xA?apiKey=K&type=transfer&limit=10"
    )]
    #[case(
        Endpoint::AddressTransactions { address: "0xA".into(), limit: DEFAULT_TRANSACTIONS_LIMIT },
        "getAddressTransactions/0xA?apiKey=K&limit=10"
    )]
    #[case(Endpoint::Top(TopOptions::default()), "getTop?apiKey=K&criteria=cap&limit=50")]
    #[case(Endpoint::TopTokens, "getTopTokens/?apiKey=K")]
    #[case(
        Endpoint::TopTokenHolders { token: "0xT".into(), limit: DEFAULT_HOLDERS_LIMIT },
        "getTopTokenHolders/0xT?apiKey=K&limit=100"
    )]
    #[case(Endpoint::TokenHistoryGrouped { token: "0xT".into() }, "getTokenHistoryGrouped/0xT?apiKey=K")]
    #[case(
        Endpoint::TokenPriceHistoryGrouped { token: "0xT".into(), period: DEFAULT_PRICE_HISTORY_PERIOD },
        "getTokenPriceHistoryGrouped/0xT?apiKey=K&period=365"
    )]
    fn builds_documented_urls(#[case] endpoint: Endpoint, #[case] suffix: &str) {
        assert_eq!(endpoint.url(BASE, "K"), format!("{BASE}{suffix}"));
    }

    #[test]
    fn overrides_replace_defaults() {
        let endpoint = Endpoint::TokenHistory {
            token: "0xT".into(),
            options: HistoryOptions::default().with_kind("approve").with_limit(3),
        };
        assert_eq!(
            endpoint.url(BASE, "K"),
            "https://api.ethplorer.io/getTokenHistory/0xT?apiKey=K&type=approve&limit=3"
        );

        let top = Endpoint::Top(TopOptions::default().with_criteria("trade").with_limit(5));
        assert!(top.url(BASE, "K").ends_with("getTop?apiKey=K&criteria=trade&limit=5"));
    }

    #[test]
    fn identifiers_are_not_encoded() {
        let endpoint = Endpoint::TokenInfo { token: "0x ab/cd?e".into() };
        assert_eq!(
            endpoint.url(BASE, "K"),
            "https://api.ethplorer.io/getTokenInfo/0x ab/cd?e?apiKey=K"
        );
    }
}
