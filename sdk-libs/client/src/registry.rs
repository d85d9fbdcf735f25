use std::collections::HashMap;

use bank_interface::derive_bank_address;
use solana_sdk::pubkey::Pubkey;

use crate::{error::Result, record::BankRecord};

/// Cache of the bank accounts last observed on the ledger.
///
/// The ledger stays authoritative. [`BankRegistry::replace_all`] is the only
/// mutator and swaps the whole set at once; readers borrow the registry and
/// therefore never see a partially replaced set.
#[derive(Debug, Default, Clone)]
pub struct BankRegistry {
    records: HashMap<Pubkey, BankRecord>,
    generation: u64,
}

impl BankRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every record. A later duplicate address wins.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = BankRecord>) {
        let records = records
            .into_iter()
            .map(|record| (record.address, record))
            .collect();
        self.records = records;
        self.generation += 1;
    }

    pub fn get(&self, address: &Pubkey) -> Option<&BankRecord> {
        self.records.get(address)
    }

    /// All records, ordered by address.
    pub fn list(&self) -> Vec<&BankRecord> {
        let mut records: Vec<&BankRecord> = self.records.values().collect();
        records.sort_by_key(|record| record.address);
        records
    }

    /// Looks up the bank derived for `owner`.
    pub fn find_by_owner(&self, owner: &Pubkey, program_id: &Pubkey) -> Result<Option<&BankRecord>> {
        let (address, _) = derive_bank_address(owner, program_id)?;
        Ok(self.get(&address))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of completed replacements.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
