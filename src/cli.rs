// src/cli.rs

use crate::client::EthplorerClient;
use crate::config::{self, environment::split_keys, ClientConfig, ConfigValidator};
use crate::core::ApiKeys;
use crate::endpoints::{
    Endpoint, HistoryOptions, TopOptions, DEFAULT_HISTORY_LIMIT, DEFAULT_HISTORY_TYPE,
    DEFAULT_HOLDERS_LIMIT, DEFAULT_PRICE_HISTORY_PERIOD, DEFAULT_TOP_CRITERIA, DEFAULT_TOP_LIMIT,
    DEFAULT_TRANSACTIONS_LIMIT,
};
use crate::error::{AppError, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ethplorer",
    version,
    about = "Query the Ethplorer API with API key rotation",
    long_about = "Command-line front end for the Ethplorer API. Requests are spread over every configured API key, round-robin by default or at random with --random-keys. Responses are printed as JSON."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "ETHPLORER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API key to use (repeat or comma-separate for several)
    #[arg(short = 'k', long = "api-key", value_name = "KEY", value_delimiter = ',', global = true)]
    pub api_keys: Vec<String>,

    /// Pick API keys at random instead of round-robin
    #[arg(long, global = true)]
    pub random_keys: bool,

    /// Log level
    #[arg(short, long, default_value = "warn", env = "RUST_LOG", global = true)]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "ETHPLORER_JSON_LOGS", global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Last block number known to the API
    LastBlock,

    /// Token metadata
    TokenInfo { token: String },

    /// Balances and token holdings of an address
    AddressInfo { address: String },

    /// Transaction details
    TxInfo { hash: String },

    /// Operations on a token
    TokenHistory {
        token: String,
        /// Operation type filter
        #[arg(long = "type", default_value = DEFAULT_HISTORY_TYPE)]
        kind: String,
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// Token operations of an address
    AddressHistory {
        address: String,
        /// Operation type filter
        #[arg(long = "type", default_value = DEFAULT_HISTORY_TYPE)]
        kind: String,
        #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
        limit: u32,
    },

    /// Ether transactions of an address
    AddressTransactions {
        address: String,
        #[arg(long, default_value_t = DEFAULT_TRANSACTIONS_LIMIT)]
        limit: u32,
    },

    /// Top tokens by criteria
    Top {
        #[arg(long, default_value = DEFAULT_TOP_CRITERIA)]
        criteria: String,
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: u32,
    },

    /// Top tokens
    TopTokens,

    /// Largest holders of a token
    TopHolders {
        token: String,
        #[arg(long, default_value_t = DEFAULT_HOLDERS_LIMIT)]
        limit: u32,
    },

    /// Token operations grouped by day
    TokenHistoryGrouped { token: String },

    /// Token prices grouped by day
    TokenPriceHistoryGrouped {
        token: String,
        /// Period in days
        #[arg(long, default_value_t = DEFAULT_PRICE_HISTORY_PERIOD)]
        period: u32,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Write an example configuration file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "ethplorer.yaml")]
        output: PathBuf,
    },
}

impl Commands {
    /// The API request this command maps to, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        let endpoint = match self {
            Self::LastBlock => Endpoint::LastBlock,
            Self::TokenInfo { token } => Endpoint::TokenInfo {
                token: token.clone(),
            },
            Self::AddressInfo { address } => Endpoint::AddressInfo {
                address: address.clone(),
            },
            Self::TxInfo { hash } => Endpoint::TxInfo { hash: hash.clone() },
            Self::TokenHistory { token, kind, limit } => Endpoint::TokenHistory {
                token: token.clone(),
                options: HistoryOptions::default()
                    .with_kind(kind.clone())
                    .with_limit(*limit),
            },
            Self::AddressHistory {
                address,
                kind,
                limit,
            } => Endpoint::AddressHistory {
                address: address.clone(),
                options: HistoryOptions::default()
                    .with_kind(kind.clone())
                    .with_limit(*limit),
            },
            Self::AddressTransactions { address, limit } => Endpoint::AddressTransactions {
                address: address.clone(),
                limit: *limit,
            },
            Self::Top { criteria, limit } => Endpoint::Top(
                TopOptions::default()
                    .with_criteria(criteria.clone())
                    .with_limit(*limit),
            ),
            Self::TopTokens => Endpoint::TopTokens,
            Self::TopHolders { token, limit } => Endpoint::TopTokenHolders {
                token: token.clone(),
                limit: *limit,
            },
            Self::TokenHistoryGrouped { token } => Endpoint::TokenHistoryGrouped {
                token: token.clone(),
            },
            Self::TokenPriceHistoryGrouped { token, period } => {
                Endpoint::TokenPriceHistoryGrouped {
                    token: token.clone(),
                    period: *period,
                }
            }
            Self::Config { .. } => return None,
        };
        Some(endpoint)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from("ethplorer.yaml"))
    }

    /// Config file, then environment, then command-line flags; validated last.
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let mut config = config::read_config(&self.config_path())?;

        if !self.api_keys.is_empty() {
            let keys = self.api_keys.iter().flat_map(|k| split_keys(k)).collect();
            config.api_keys = ApiKeys::Many(keys);
        }

        if self.random_keys {
            config.random_keys = true;
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Runs the selected command and returns what should be printed.
    pub async fn execute(self) -> Result<String> {
        if let Commands::Config { action } = &self.command {
            return match action {
                ConfigCommands::Validate { file } => {
                    let path = file.clone().unwrap_or_else(|| self.config_path());
                    validate_file(&path)
                }
                ConfigCommands::Init { output } => {
                    let example = ClientConfig::new(vec!["your-api-key-1", "your-api-key-2"]);
                    config::save_config(&example, output).await?;
                    Ok(format!("Configuration written to {}", output.display()))
                }
            };
        }

        let endpoint = self.command.endpoint().ok_or_else(|| {
            AppError::invalid_configuration("Command does not map to an API request", None::<String>)
        })?;

        let config = self.resolve_config()?;
        let client = EthplorerClient::from_config(&config)?;
        info!(endpoint = endpoint.name(), keys = client.credential_count(), "Running command");

        let payload = client.request(endpoint).await?;
        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

fn validate_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AppError::ConfigNotFound {
            path: path.display().to_string(),
        });
    }
    let config = config::load_config(path)?;
    Ok(format!(
        "Configuration {} is valid: {} API key(s), {} rotation",
        path.display(),
        config.api_keys.len(),
        config.policy().as_str()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn history_defaults_match_library() {
        let cli = Cli::try_parse_from(["ethplorer", "-k", "k", "token-history", "0xT"]).unwrap();
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::TokenHistory {
                token: "0xT".into(),
                options: HistoryOptions::default(),
            })
        );
    }

    #[test]
    fn comma_separated_keys_are_split() {
        let cli = Cli::try_parse_from(["ethplorer", "--api-key", "a,b", "-k", "c", "top-tokens"])
            .unwrap();
        assert_eq!(cli.api_keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn top_options_are_forwarded() {
        let cli = Cli::try_parse_from([
            "ethplorer", "top", "--criteria", "trade", "--limit", "7",
        ])
        .unwrap();
        assert_eq!(
            cli.command.endpoint(),
            Some(Endpoint::Top(TopOptions::default().with_criteria("trade").with_limit(7)))
        );
    }

    #[test]
    fn config_command_has_no_endpoint() {
        let cli = Cli::try_parse_from(["ethplorer", "config", "validate"]).unwrap();
        assert!(cli.command.endpoint().is_none());
    }
}
