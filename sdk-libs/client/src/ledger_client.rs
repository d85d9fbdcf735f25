use futures::{stream, StreamExt};
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Signature, signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, info, warn};

use crate::{
    config::DEFAULT_MAX_CONCURRENT_FETCHES,
    error::{BankClientError, Operation, Result},
    record::BankRecord,
    registry::BankRegistry,
    rpc::LedgerTransport,
};

/// An account left out of an enumeration, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAccount {
    pub address: Pubkey,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Decoded banks, ordered by address.
    pub records: Vec<BankRecord>,
    pub skipped: Vec<SkippedAccount>,
}

/// Submits bank transactions and reads bank accounts through a [`LedgerTransport`].
#[derive(Debug)]
pub struct LedgerClient<T: LedgerTransport> {
    transport: T,
    max_concurrent_fetches: usize,
}

impl<T: LedgerTransport> LedgerClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_max_concurrent_fetches(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Signs `instruction` with `payer` and waits for confirmation.
    ///
    /// Nothing is retried here. On [`BankClientError::Ambiguous`] the caller
    /// must check the returned signature before resubmitting.
    pub async fn submit<S: Signer + ?Sized>(
        &self,
        instruction: Instruction,
        payer: &S,
    ) -> Result<Signature> {
        self.submit_for(Operation::Submit, None, instruction, payer)
            .await
    }

    pub(crate) async fn submit_for<S: Signer + ?Sized>(
        &self,
        operation: Operation,
        address: Option<Pubkey>,
        instruction: Instruction,
        payer: &S,
    ) -> Result<Signature> {
        let blockhash = self
            .transport
            .get_latest_blockhash()
            .await
            .map_err(|e| BankClientError::from_rpc(operation, address, e))?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        let signature = self
            .transport
            .send_and_confirm(&transaction)
            .await
            .map_err(|e| BankClientError::from_rpc(operation, address, e))?;
        info!(%signature, %operation, ?address, "Transaction confirmed");
        Ok(signature)
    }

    /// Every bank owned by `program_id` that could be fetched and decoded.
    pub async fn fetch_all(&self, program_id: &Pubkey) -> Result<Vec<BankRecord>> {
        Ok(self.fetch_all_with_report(program_id).await?.records)
    }

    /// Enumerates the program's accounts, then fetches and decodes each one
    /// concurrently. A failure for one account skips only that account; only
    /// a failed enumeration fails the call.
    pub async fn fetch_all_with_report(&self, program_id: &Pubkey) -> Result<FetchReport> {
        let accounts = self
            .transport
            .get_program_accounts(program_id)
            .await
            .map_err(|e| BankClientError::from_rpc(Operation::FetchBanks, None, e))?;
        debug!(
            "Enumerated {} accounts owned by {}",
            accounts.len(),
            program_id
        );

        let fetches = accounts.into_iter().map(|(address, _)| async move {
            (address, self.fetch_bank(&address, program_id).await)
        });
        let outcomes: Vec<(Pubkey, Result<Option<BankRecord>>)> = stream::iter(fetches)
            .buffer_unordered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut report = FetchReport::default();
        for (address, outcome) in outcomes {
            match outcome {
                Ok(Some(record)) => report.records.push(record),
                Ok(None) => {
                    warn!(%address, "Bank account closed after enumeration, skipping");
                    report.skipped.push(SkippedAccount {
                        address,
                        reason: "account no longer exists".to_string(),
                    });
                }
                Err(e) => {
                    warn!(%address, error = %e, "Skipping bank account");
                    report.skipped.push(SkippedAccount {
                        address,
                        reason: e.to_string(),
                    });
                }
            }
        }
        report.records.sort_by_key(|record| record.address);
        report.skipped.sort_by_key(|skipped| skipped.address);
        Ok(report)
    }

    /// Current state of one bank, `None` if the account does not exist.
    pub async fn fetch_bank(
        &self,
        address: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Option<BankRecord>> {
        let account = self
            .transport
            .get_account(address)
            .await
            .map_err(|e| BankClientError::from_rpc(Operation::FetchBanks, Some(*address), e))?;
        match account {
            None => Ok(None),
            Some(account) if account.owner != *program_id => {
                Err(BankClientError::MalformedAccount {
                    address: Some(*address),
                    reason: format!("owned by {}, expected {}", account.owner, program_id),
                })
            }
            Some(account) => BankRecord::from_account_data(*address, &account.data).map(Some),
        }
    }

    /// Fetches all banks and swaps them into `registry` in one step.
    pub async fn refresh(
        &self,
        program_id: &Pubkey,
        registry: &mut BankRegistry,
    ) -> Result<FetchReport> {
        let report = self.fetch_all_with_report(program_id).await?;
        registry.replace_all(report.records.iter().cloned());
        Ok(report)
    }
}
