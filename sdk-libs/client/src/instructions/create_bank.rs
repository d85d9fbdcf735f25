use bank_interface::{derive_bank_address, encode_create_args, schema::CREATE, SYSTEM_PROGRAM_ID};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use super::BankInstructionBuilder;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBankInstruction {
    /// Derived address of the bank the instruction creates.
    pub bank: Pubkey,
    pub bump: u8,
    pub instruction: Instruction,
}

impl BankInstructionBuilder {
    /// `create` instruction for the bank of `owner`, named with the builder's
    /// default name.
    pub fn build_create(&self, owner: &Pubkey) -> Result<CreateBankInstruction> {
        self.build_create_with_name(owner, self.bank_name())
    }

    pub fn build_create_with_name(
        &self,
        owner: &Pubkey,
        name: &str,
    ) -> Result<CreateBankInstruction> {
        let (bank, bump) = derive_bank_address(owner, self.program_id())?;
        let data = encode_create_args(name)?;
        let accounts = CREATE.account_metas(&[bank, *owner, SYSTEM_PROGRAM_ID])?;
        Ok(CreateBankInstruction {
            bank,
            bump,
            instruction: Instruction {
                program_id: *self.program_id(),
                accounts,
                data,
            },
        })
    }
}
