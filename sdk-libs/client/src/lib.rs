//! Client for the bank program.
//!
//! [`instructions::BankInstructionBuilder`] builds `create` and `deposit`
//! instructions, [`ledger_client::LedgerClient`] submits them and enumerates
//! bank accounts, and [`registry::BankRegistry`] caches the last observed set.
//! [`session::BankSession`] ties the three together for a single wallet.

pub mod config;
pub mod error;
pub mod instructions;
pub mod ledger_client;
pub mod record;
pub mod registry;
pub mod rpc;
pub mod session;
pub mod telemetry;

pub use bank_interface;
pub use config::BankClientConfig;
pub use error::{BankClientError, Operation, Result};
pub use instructions::{sol_to_lamports, BankInstructionBuilder, CreateBankInstruction};
pub use ledger_client::{FetchReport, LedgerClient, SkippedAccount};
pub use record::BankRecord;
pub use registry::BankRegistry;
pub use session::BankSession;
