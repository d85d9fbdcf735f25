use std::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{self, Transaction},
};
use tokio::time::{sleep, Instant};
use tracing::warn;

use super::{errors::RpcError, ledger_transport::LedgerTransport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolanaRpcUrl {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
    Custom(String),
}

impl Display for SolanaRpcUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            SolanaRpcUrl::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
            SolanaRpcUrl::Testnet => "https://api.testnet.solana.com".to_string(),
            SolanaRpcUrl::Devnet => "https://api.devnet.solana.com".to_string(),
            SolanaRpcUrl::Localnet => "http://localhost:8899".to_string(),
            SolanaRpcUrl::Custom(url) => url.clone(),
        };
        write!(f, "{}", str)
    }
}

impl SolanaRpcUrl {
    /// Parses a cluster moniker as accepted in the `NETWORK` environment variable.
    pub fn from_network(network: &str) -> Option<Self> {
        match network {
            "mainnet" | "mainnet-beta" => Some(SolanaRpcUrl::Mainnet),
            "testnet" => Some(SolanaRpcUrl::Testnet),
            "devnet" => Some(SolanaRpcUrl::Devnet),
            "localnet" | "local" => Some(SolanaRpcUrl::Localnet),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Deadline for read retries and for confirming a sent transaction.
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 30,
            retry_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

pub struct SolanaRpcTransport {
    pub client: RpcClient,
    pub retry_config: RetryConfig,
}

impl Debug for SolanaRpcTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolanaRpcTransport {{ client: {:?} }}", self.client.url())
    }
}

impl SolanaRpcTransport {
    pub fn new<U: ToString>(
        url: U,
        commitment_config: Option<CommitmentConfig>,
        retry_config: Option<RetryConfig>,
    ) -> Self {
        let commitment_config = commitment_config.unwrap_or(CommitmentConfig::confirmed());
        let client = RpcClient::new_with_commitment(url.to_string(), commitment_config);
        Self {
            client,
            retry_config: retry_config.unwrap_or_default(),
        }
    }

    /// Retries transport failures. Rejections are returned immediately.
    async fn retry<F, Fut, T>(&self, operation: F) -> Result<T, RpcError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, RpcError>>,
    {
        let mut attempts = 0;
        let start_time = Instant::now();
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_rejection() => return Err(e),
                Err(e) => {
                    attempts += 1;
                    if attempts >= self.retry_config.max_retries
                        || start_time.elapsed() >= self.retry_config.timeout
                    {
                        return Err(e);
                    }
                    warn!(
                        "Operation failed, retrying in {:?} (attempt {}/{}): {:?}",
                        self.retry_config.retry_delay,
                        attempts,
                        self.retry_config.max_retries,
                        e
                    );
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl LedgerTransport for SolanaRpcTransport {
    fn url(&self) -> String {
        self.client.url()
    }

    fn retry_config(&self) -> RetryConfig {
        self.retry_config
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        self.retry(|| async {
            self.client
                .get_latest_blockhash()
                .await
                .map_err(RpcError::from)
        })
        .await
    }

    // Never retried: a resend after an ambiguous failure could land twice.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(RpcError::from)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<transaction::Result<()>>, RpcError> {
        self.client
            .get_signature_status(signature)
            .await
            .map_err(RpcError::from)
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError> {
        self.retry(|| async {
            self.client
                .get_program_accounts(program_id)
                .await
                .map_err(RpcError::from)
        })
        .await
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        self.retry(|| async {
            self.client
                .get_account_with_commitment(address, self.client.commitment())
                .await
                .map(|response| response.value)
                .map_err(RpcError::from)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_url() {
        assert_eq!(SolanaRpcUrl::Localnet.to_string(), "http://localhost:8899");
        assert_eq!(
            SolanaRpcUrl::from_network("mainnet"),
            Some(SolanaRpcUrl::Mainnet)
        );
        assert_eq!(SolanaRpcUrl::from_network("local"), Some(SolanaRpcUrl::Localnet));
        assert_eq!(SolanaRpcUrl::from_network("moon"), None);
        assert_eq!(
            SolanaRpcUrl::Custom("http://10.0.0.1:8899".to_string()).to_string(),
            "http://10.0.0.1:8899"
        );
    }

    #[test]
    fn test_transport_reports_url() {
        let transport = SolanaRpcTransport::new(SolanaRpcUrl::Devnet, None, None);
        assert_eq!(transport.url(), "https://api.devnet.solana.com");
        assert_eq!(transport.retry_config(), RetryConfig::default());
    }
}
