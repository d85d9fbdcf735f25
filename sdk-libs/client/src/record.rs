use bank_interface::{constants::LAMPORTS_PER_SOL, BankAccount};
use solana_sdk::pubkey::Pubkey;

use crate::error::{BankClientError, Result};

/// A bank account as observed on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankRecord {
    pub address: Pubkey,
    pub name: String,
    /// Lamports.
    pub balance: u64,
}

impl BankRecord {
    pub fn from_account_data(address: Pubkey, data: &[u8]) -> Result<Self> {
        let account = BankAccount::try_from_account_data(data)
            .map_err(|e| BankClientError::from(e).with_address(address))?;
        Ok(Self::from_account(address, account))
    }

    pub fn from_account(address: Pubkey, account: BankAccount) -> Self {
        Self {
            address,
            name: account.name,
            balance: account.balance,
        }
    }

    /// Balance in SOL, for display only.
    pub fn balance_sol(&self) -> f64 {
        self.balance as f64 / LAMPORTS_PER_SOL as f64
    }
}
