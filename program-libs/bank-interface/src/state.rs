use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constants::{BANK_ACCOUNT_SPACE, MAX_NAME_LEN},
    discriminator::{strip_discriminator, Discriminator, DISCRIMINATOR_LEN},
    error::{BankInterfaceError, Result},
    instruction_data::check_name,
    schema::BANK,
};

/// On-ledger state of a bank account.
///
/// Stored as discriminator, borsh-encoded fields, then zero padding up to
/// [`BANK_ACCOUNT_SPACE`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct BankAccount {
    pub name: String,
    pub balance: u64,
}

impl Discriminator for BankAccount {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = BANK.discriminator;
}

impl BankAccount {
    pub fn new(name: &str, balance: u64) -> Result<Self> {
        check_name(name)?;
        Ok(Self {
            name: name.to_string(),
            balance,
        })
    }

    pub fn try_from_account_data(data: &[u8]) -> Result<Self> {
        if data.len() != BANK_ACCOUNT_SPACE {
            return Err(BankInterfaceError::MalformedAccount(format!(
                "account is {} bytes, expected {}",
                data.len(),
                BANK_ACCOUNT_SPACE
            )));
        }
        let mut fields = strip_discriminator::<Self>(data)?;

        let name_len = u32::from_le_bytes([fields[0], fields[1], fields[2], fields[3]]) as usize;
        if name_len > MAX_NAME_LEN {
            return Err(BankInterfaceError::MalformedAccount(format!(
                "name length {} exceeds {}",
                name_len, MAX_NAME_LEN
            )));
        }
        Self::deserialize(&mut fields)
            .map_err(|e| BankInterfaceError::MalformedAccount(e.to_string()))
    }

    pub fn to_account_data(&self) -> Result<Vec<u8>> {
        check_name(&self.name)?;
        let mut data = Vec::with_capacity(BANK_ACCOUNT_SPACE);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        self.serialize(&mut data)
            .map_err(|e| BankInterfaceError::Serialization(e.to_string()))?;
        data.resize(BANK_ACCOUNT_SPACE, 0);
        Ok(data)
    }

    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            BankInterfaceError::InvalidAmount(format!(
                "deposit of {} overflows balance {}",
                amount, self.balance
            ))
        })?;
        Ok(())
    }
}
