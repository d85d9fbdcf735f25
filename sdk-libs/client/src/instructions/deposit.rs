use bank_interface::{
    constants::LAMPORTS_PER_SOL, encode_deposit_args, schema::DEPOSIT, SYSTEM_PROGRAM_ID,
};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use super::BankInstructionBuilder;
use crate::error::{BankClientError, Result};

impl BankInstructionBuilder {
    /// `deposit` instruction moving `amount` lamports from `owner` into `bank`.
    ///
    /// `bank` must be an address observed on the ledger, it is not re-derived.
    pub fn build_deposit(&self, bank: &Pubkey, owner: &Pubkey, amount: u64) -> Result<Instruction> {
        let data = encode_deposit_args(amount)?;
        let accounts = DEPOSIT.account_metas(&[*bank, *owner, SYSTEM_PROGRAM_ID])?;
        Ok(Instruction {
            program_id: *self.program_id(),
            accounts,
            data,
        })
    }
}

/// Converts a SOL amount entered by a user into lamports.
pub fn sol_to_lamports(sol: f64) -> Result<u64> {
    if !sol.is_finite() || sol <= 0.0 {
        return Err(BankClientError::InvalidAmount(format!(
            "{} is not a positive amount of SOL",
            sol
        )));
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    // u64::MAX as f64 rounds up to 2^64, which is itself out of range.
    if lamports >= u64::MAX as f64 {
        return Err(BankClientError::InvalidAmount(format!(
            "{} SOL exceeds the representable lamport range",
            sol
        )));
    }
    if lamports < 1.0 {
        return Err(BankClientError::InvalidAmount(format!(
            "{} SOL is less than one lamport",
            sol
        )));
    }
    Ok(lamports as u64)
}
