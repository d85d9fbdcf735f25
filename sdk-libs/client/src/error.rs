use std::fmt::{Display, Formatter};

use bank_interface::BankInterfaceError;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

use crate::rpc::RpcError;

pub type Result<T> = std::result::Result<T, BankClientError>;

/// The ledger interaction an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateBank,
    Deposit,
    FetchBanks,
    Submit,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Operation::CreateBank => "create bank",
            Operation::Deposit => "deposit",
            Operation::FetchBanks => "fetch banks",
            Operation::Submit => "submit",
        };
        write!(f, "{}", str)
    }
}

#[derive(Error, Debug)]
pub enum BankClientError {
    #[error("Invalid seeds: {0}")]
    InvalidSeed(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid bank name: {0}")]
    InvalidName(String),

    #[error("Malformed bank account{}: {reason}", at(.address))]
    MalformedAccount {
        address: Option<Pubkey>,
        reason: String,
    },

    #[error("{operation} rejected by the ledger{}: {reason}", at(.address))]
    Rejected {
        operation: Operation,
        address: Option<Pubkey>,
        reason: String,
    },

    #[error("{operation} could not reach the ledger{}: {source}", at(.address))]
    Network {
        operation: Operation,
        address: Option<Pubkey>,
        #[source]
        source: RpcError,
    },

    /// Sent but not confirmed. Resubmitting blindly may duplicate the operation.
    #[error("{operation}{} sent as {signature} but not confirmed", at(.address))]
    Ambiguous {
        operation: Operation,
        address: Option<Pubkey>,
        signature: Signature,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn at(address: &Option<Pubkey>) -> String {
    address
        .map(|address| format!(" for {}", address))
        .unwrap_or_default()
}

impl From<BankInterfaceError> for BankClientError {
    fn from(e: BankInterfaceError) -> Self {
        match e {
            BankInterfaceError::InvalidSeed(reason) => BankClientError::InvalidSeed(reason),
            BankInterfaceError::InvalidName(reason) => BankClientError::InvalidName(reason),
            BankInterfaceError::InvalidAmount(reason) => BankClientError::InvalidAmount(reason),
            BankInterfaceError::MalformedAccount(reason) => BankClientError::MalformedAccount {
                address: None,
                reason,
            },
            BankInterfaceError::SchemaMismatch(reason) => BankClientError::Configuration(reason),
            BankInterfaceError::Serialization(reason) => BankClientError::Serialization(reason),
        }
    }
}

impl BankClientError {
    /// Classifies a transport failure of `operation`.
    pub fn from_rpc(operation: Operation, address: Option<Pubkey>, error: RpcError) -> Self {
        match error {
            RpcError::Unconfirmed(signature) => BankClientError::Ambiguous {
                operation,
                address,
                signature,
            },
            error if error.is_rejection() => BankClientError::Rejected {
                operation,
                address,
                reason: error.to_string(),
            },
            error => BankClientError::Network {
                operation,
                address,
                source: error,
            },
        }
    }

    /// Safe to retry with backoff: nothing reached the ledger.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BankClientError::Network { .. })
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            BankClientError::Rejected { operation, .. }
            | BankClientError::Network { operation, .. }
            | BankClientError::Ambiguous { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<Pubkey> {
        match self {
            BankClientError::MalformedAccount { address, .. }
            | BankClientError::Rejected { address, .. }
            | BankClientError::Network { address, .. }
            | BankClientError::Ambiguous { address, .. } => *address,
            _ => None,
        }
    }

    pub(crate) fn with_address(self, account: Pubkey) -> Self {
        match self {
            BankClientError::MalformedAccount { reason, .. } => BankClientError::MalformedAccount {
                address: Some(account),
                reason,
            },
            other => other,
        }
    }
}
