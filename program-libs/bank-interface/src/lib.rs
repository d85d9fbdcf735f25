//! Shared definitions for the bank program: program id, account layout,
//! instruction data and program-derived address derivation.
//!
//! Nothing in this crate performs I/O. Everything here is deterministic and
//! can be used by on-ledger tooling and off-ledger clients alike.

pub mod address;
pub mod constants;
pub mod discriminator;
pub mod error;
pub mod instruction_data;
pub mod schema;
pub mod state;

pub use address::{create_address_with_bump, derive_address, derive_bank_address};
pub use discriminator::{Discriminator, DISCRIMINATOR_LEN};
pub use error::{BankInterfaceError, Result};
pub use instruction_data::{encode_create_args, encode_deposit_args};
pub use schema::BankProgramSchema;
pub use state::BankAccount;

use solana_pubkey::{pubkey, Pubkey};

/// Default deployment of the bank program.
pub const ID: Pubkey = pubkey!("53YcjqFmD3LWmnSfq6HRW5Jw3zqQbsCTayxvoJwYTcJD");

pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk_ids::system_program::ID;
