use std::fmt::Debug;

use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::{self, Transaction},
};
use tokio::time::{sleep, Instant};
use tracing::debug;

use super::{errors::RpcError, solana_rpc::RetryConfig};

/// Connection to the ledger node.
///
/// Implementations own request timeouts. A timeout surfaces as a non-rejection
/// [`RpcError`].
#[async_trait]
pub trait LedgerTransport: Send + Sync + Debug + 'static {
    fn url(&self) -> String;

    /// Polling cadence and deadline used by [`LedgerTransport::send_and_confirm`].
    fn retry_config(&self) -> RetryConfig;

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError>;

    /// Submits a signed transaction without waiting for it to land.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError>;

    /// `None` while the ledger has no record of the signature.
    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<transaction::Result<()>>, RpcError>;

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError>;

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError>;

    /// Sends `transaction` and polls its status until it is confirmed, fails,
    /// or the confirmation deadline passes.
    ///
    /// A send that fails in flight, anything but a rejection or an
    /// [`RpcError::is_unsent`] error, may still have delivered the transaction
    /// and is polled by its signature as well. Once the transaction may have
    /// reached the node, an unknown outcome is reported as
    /// [`RpcError::Unconfirmed`].
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        let signature = match self.send_transaction(transaction).await {
            Ok(signature) => signature,
            Err(e) if e.is_rejection() || e.is_unsent() => return Err(e),
            Err(e) => match transaction.signatures.first() {
                Some(signature) => {
                    debug!("Send of {} failed in flight, polling status: {:?}", signature, e);
                    *signature
                }
                None => return Err(e),
            },
        };
        let retry_config = self.retry_config();
        let start_time = Instant::now();
        loop {
            match self.get_signature_status(&signature).await {
                Ok(Some(Ok(()))) => return Ok(signature),
                Ok(Some(Err(e))) => return Err(RpcError::from(e)),
                Ok(None) => {}
                Err(e) => debug!("Status poll for {} failed: {:?}", signature, e),
            }
            if start_time.elapsed() >= retry_config.timeout {
                return Err(RpcError::Unconfirmed(signature));
            }
            sleep(retry_config.retry_delay).await;
        }
    }
}
