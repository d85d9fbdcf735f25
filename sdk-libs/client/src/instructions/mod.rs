mod create_bank;
mod deposit;

use bank_interface::{constants::DEFAULT_BANK_NAME, instruction_data::check_name, BankProgramSchema};
pub use create_bank::CreateBankInstruction;
pub use deposit::sol_to_lamports;
use solana_sdk::pubkey::Pubkey;

use crate::error::Result;

/// Builds bank program instructions for one program deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankInstructionBuilder {
    program_id: Pubkey,
    bank_name: String,
}

impl BankInstructionBuilder {
    /// Validates the compiled program schema once, then binds `program_id`.
    pub fn new(program_id: Pubkey) -> Result<Self> {
        BankProgramSchema::default().validate()?;
        Ok(Self {
            program_id,
            bank_name: DEFAULT_BANK_NAME.to_string(),
        })
    }

    /// Name used by [`BankInstructionBuilder::build_create`].
    pub fn with_bank_name(mut self, name: &str) -> Result<Self> {
        check_name(name)?;
        self.bank_name = name.to_string();
        Ok(self)
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }
}
