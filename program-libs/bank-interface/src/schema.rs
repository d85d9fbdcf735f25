//! Static description of the bank program's interface.
//!
//! Instruction and account layouts are compiled in. [`BankProgramSchema::validate`]
//! recomputes every discriminator from its preimage and is run once at startup.

use std::collections::HashSet;

use solana_instruction::AccountMeta;
use solana_pubkey::Pubkey;

use crate::{
    constants::BANK_ACCOUNT_SPACE,
    discriminator::{hash_discriminator, DISCRIMINATOR_LEN},
    error::{BankInterfaceError, Result},
};

const INSTRUCTION_NAMESPACE: &str = "global";
const ACCOUNT_NAMESPACE: &str = "account";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMetaLayout {
    pub name: &'static str,
    pub is_writable: bool,
    pub is_signer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionLayout {
    pub name: &'static str,
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    /// Order matches the program's expected argument order.
    pub accounts: &'static [AccountMetaLayout],
}

impl InstructionLayout {
    /// Pairs `keys` with the flags of this layout, position by position.
    pub fn account_metas(&self, keys: &[Pubkey]) -> Result<Vec<AccountMeta>> {
        if keys.len() != self.accounts.len() {
            return Err(BankInterfaceError::SchemaMismatch(format!(
                "instruction `{}` takes {} accounts, {} given",
                self.name,
                self.accounts.len(),
                keys.len()
            )));
        }
        Ok(self
            .accounts
            .iter()
            .zip(keys)
            .map(|(layout, key)| AccountMeta {
                pubkey: *key,
                is_signer: layout.is_signer,
                is_writable: layout.is_writable,
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLayout {
    pub name: &'static str,
    pub discriminator: [u8; DISCRIMINATOR_LEN],
    pub space: usize,
}

const BANK_OPERATION_ACCOUNTS: &[AccountMetaLayout] = &[
    AccountMetaLayout {
        name: "bank",
        is_writable: true,
        is_signer: false,
    },
    AccountMetaLayout {
        name: "user",
        is_writable: true,
        is_signer: true,
    },
    AccountMetaLayout {
        name: "system_program",
        is_writable: false,
        is_signer: false,
    },
];

pub const CREATE: InstructionLayout = InstructionLayout {
    name: "create",
    discriminator: [24, 30, 200, 40, 5, 28, 7, 119],
    accounts: BANK_OPERATION_ACCOUNTS,
};

pub const DEPOSIT: InstructionLayout = InstructionLayout {
    name: "deposit",
    discriminator: [242, 35, 198, 137, 82, 225, 242, 182],
    accounts: BANK_OPERATION_ACCOUNTS,
};

pub const BANK: AccountLayout = AccountLayout {
    name: "Bank",
    discriminator: [142, 49, 166, 242, 50, 66, 97, 188],
    space: BANK_ACCOUNT_SPACE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankProgramSchema {
    pub instructions: &'static [InstructionLayout],
    pub accounts: &'static [AccountLayout],
}

pub const BANK_PROGRAM_SCHEMA: BankProgramSchema = BankProgramSchema {
    instructions: &[CREATE, DEPOSIT],
    accounts: &[BANK],
};

impl Default for BankProgramSchema {
    fn default() -> Self {
        BANK_PROGRAM_SCHEMA
    }
}

impl BankProgramSchema {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for layout in self.instructions {
            let expected =
                hash_discriminator(&format!("{}:{}", INSTRUCTION_NAMESPACE, layout.name));
            if layout.discriminator != expected {
                return Err(BankInterfaceError::SchemaMismatch(format!(
                    "instruction `{}` discriminator {:?}, expected {:?}",
                    layout.name, layout.discriminator, expected
                )));
            }
            if !seen.insert(layout.discriminator) {
                return Err(BankInterfaceError::SchemaMismatch(format!(
                    "instruction `{}` reuses a discriminator",
                    layout.name
                )));
            }
            if !layout.accounts.iter().any(|account| account.is_signer) {
                return Err(BankInterfaceError::SchemaMismatch(format!(
                    "instruction `{}` has no signer",
                    layout.name
                )));
            }
        }
        for layout in self.accounts {
            let expected = hash_discriminator(&format!("{}:{}", ACCOUNT_NAMESPACE, layout.name));
            if layout.discriminator != expected {
                return Err(BankInterfaceError::SchemaMismatch(format!(
                    "account `{}` discriminator {:?}, expected {:?}",
                    layout.name, layout.discriminator, expected
                )));
            }
            if layout.space <= DISCRIMINATOR_LEN {
                return Err(BankInterfaceError::SchemaMismatch(format!(
                    "account `{}` space {} cannot hold any data",
                    layout.name, layout.space
                )));
            }
        }
        Ok(())
    }

    /// Looks up the instruction whose discriminator prefixes `data`.
    pub fn instruction_for_data(&self, data: &[u8]) -> Option<&InstructionLayout> {
        let prefix = data.get(..DISCRIMINATOR_LEN)?;
        self.instructions
            .iter()
            .find(|layout| layout.discriminator == prefix)
    }
}
