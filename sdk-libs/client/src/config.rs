use std::str::FromStr;

use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{
    error::{BankClientError, Result},
    rpc::{RetryConfig, SolanaRpcUrl},
};

pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;

#[derive(Debug, Clone)]
pub struct BankClientConfig {
    pub url: String,
    pub commitment: CommitmentConfig,
    pub program_id: Pubkey,
    /// Upper bound on account fetches in flight during enumeration.
    pub max_concurrent_fetches: usize,
    pub retry: RetryConfig,
}

impl Default for BankClientConfig {
    fn default() -> Self {
        Self {
            url: SolanaRpcUrl::Localnet.to_string(),
            commitment: CommitmentConfig::confirmed(),
            program_id: bank_interface::ID,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            retry: RetryConfig::default(),
        }
    }
}

impl BankClientConfig {
    /// Reads `RPC_URL`, `NETWORK`, `BANK_PROGRAM_ID` and
    /// `BANK_MAX_CONCURRENT_FETCHES`. `RPC_URL` takes precedence over `NETWORK`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("RPC_URL") {
            config.url = url;
        } else if let Some(network) = lookup("NETWORK") {
            config.url = SolanaRpcUrl::from_network(&network)
                .ok_or_else(|| {
                    BankClientError::Configuration(format!("unknown NETWORK `{}`", network))
                })?
                .to_string();
        }

        if let Some(program_id) = lookup("BANK_PROGRAM_ID") {
            config.program_id = Pubkey::from_str(&program_id).map_err(|e| {
                BankClientError::Configuration(format!(
                    "BANK_PROGRAM_ID `{}` is not a valid address: {}",
                    program_id, e
                ))
            })?;
        }

        if let Some(max) = lookup("BANK_MAX_CONCURRENT_FETCHES") {
            config.max_concurrent_fetches = match max.parse::<usize>() {
                Ok(max) if max > 0 => max,
                _ => {
                    return Err(BankClientError::Configuration(format!(
                        "BANK_MAX_CONCURRENT_FETCHES `{}` must be a positive integer",
                        max
                    )))
                }
            };
        }

        Ok(config)
    }
}
