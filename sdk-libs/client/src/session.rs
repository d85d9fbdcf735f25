use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer};
use tracing::error;

use crate::{
    config::BankClientConfig,
    error::{Operation, Result},
    instructions::BankInstructionBuilder,
    ledger_client::{FetchReport, LedgerClient},
    record::BankRecord,
    registry::BankRegistry,
    rpc::{LedgerTransport, SolanaRpcTransport},
};

/// A wallet-facing bank session: create a bank, deposit into one, list all.
///
/// The registry is refreshed only on [`BankSession::refresh`]; actions do not
/// update it optimistically.
#[derive(Debug)]
pub struct BankSession<T: LedgerTransport> {
    ledger: LedgerClient<T>,
    builder: BankInstructionBuilder,
    registry: BankRegistry,
}

impl BankSession<SolanaRpcTransport> {
    pub fn from_config(config: &BankClientConfig) -> Result<Self> {
        let transport =
            SolanaRpcTransport::new(&config.url, Some(config.commitment), Some(config.retry));
        let ledger =
            LedgerClient::new(transport).with_max_concurrent_fetches(config.max_concurrent_fetches);
        let builder = BankInstructionBuilder::new(config.program_id)?;
        Ok(Self::new(ledger, builder))
    }
}

impl<T: LedgerTransport> BankSession<T> {
    pub fn new(ledger: LedgerClient<T>, builder: BankInstructionBuilder) -> Self {
        Self {
            ledger,
            builder,
            registry: BankRegistry::new(),
        }
    }

    /// Creates the bank derived for `wallet` and returns its address.
    pub async fn create_bank<S: Signer + ?Sized>(&self, wallet: &S) -> Result<(Pubkey, Signature)> {
        let result: Result<(Pubkey, Signature)> = async {
            let create = self.builder.build_create(&wallet.pubkey())?;
            let signature = self
                .ledger
                .submit_for(
                    Operation::CreateBank,
                    Some(create.bank),
                    create.instruction,
                    wallet,
                )
                .await?;
            Ok((create.bank, signature))
        }
        .await;
        if let Err(e) = &result {
            error!(owner = %wallet.pubkey(), "Failed to create bank: {}", e);
        }
        result
    }

    pub async fn deposit<S: Signer + ?Sized>(
        &self,
        wallet: &S,
        bank: &Pubkey,
        lamports: u64,
    ) -> Result<Signature> {
        let result: Result<Signature> = async {
            let instruction = self
                .builder
                .build_deposit(bank, &wallet.pubkey(), lamports)?;
            self.ledger
                .submit_for(Operation::Deposit, Some(*bank), instruction, wallet)
                .await
        }
        .await;
        if let Err(e) = &result {
            error!(%bank, lamports, "Failed to deposit: {}", e);
        }
        result
    }

    /// Reloads every bank from the ledger. On failure the registry keeps its
    /// previous contents.
    pub async fn refresh(&mut self) -> Result<FetchReport> {
        let result = self
            .ledger
            .refresh(self.builder.program_id(), &mut self.registry)
            .await;
        if let Err(e) = &result {
            error!("Failed to refresh banks: {}", e);
        }
        result
    }

    /// Banks as of the last successful refresh, ordered by address.
    pub fn banks(&self) -> Vec<&BankRecord> {
        self.registry.list()
    }

    pub fn registry(&self) -> &BankRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &LedgerClient<T> {
        &self.ledger
    }

    pub fn builder(&self) -> &BankInstructionBuilder {
        &self.builder
    }
}
