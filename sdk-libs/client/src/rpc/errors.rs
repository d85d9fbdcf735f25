use std::io;

use solana_rpc_client_api::client_error::{Error as ClientError, ErrorKind as ClientErrorKind};
use solana_sdk::{signature::Signature, transaction::TransactionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("TransactionError: {0}")]
    TransactionError(#[from] Box<TransactionError>),

    #[error("ClientError: {0}")]
    ClientError(#[from] Box<ClientError>),

    #[error("IoError: {0}")]
    IoError(#[from] Box<io::Error>),

    /// The ledger accepted the transaction but did not report its outcome in time.
    #[error("Transaction {0} was sent but is not confirmed")]
    Unconfirmed(Signature),

    #[error("Error: `{0}`")]
    CustomError(String),
}

impl From<TransactionError> for RpcError {
    fn from(err: TransactionError) -> Self {
        RpcError::TransactionError(Box::new(err))
    }
}

impl From<ClientError> for RpcError {
    fn from(err: ClientError) -> Self {
        RpcError::ClientError(Box::new(err))
    }
}

impl From<io::Error> for RpcError {
    fn from(err: io::Error) -> Self {
        RpcError::IoError(Box::new(err))
    }
}

impl RpcError {
    /// True when the ledger evaluated the transaction and refused it,
    /// including preflight simulation failures.
    pub fn is_rejection(&self) -> bool {
        match self {
            RpcError::TransactionError(_) => true,
            RpcError::ClientError(err) => err.get_transaction_error().is_some(),
            _ => false,
        }
    }

    /// True when the request provably never reached the node, e.g. the
    /// connection was refused. Any other transport failure of a send may
    /// still have delivered the transaction.
    pub fn is_unsent(&self) -> bool {
        match self {
            RpcError::IoError(err) => is_connect_failure(err.kind()),
            RpcError::ClientError(err) => match err.kind() {
                ClientErrorKind::Io(err) => is_connect_failure(err.kind()),
                ClientErrorKind::Reqwest(err) => err.is_connect() || err.is_builder(),
                _ => false,
            },
            _ => false,
        }
    }
}

fn is_connect_failure(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::NotConnected
            | io::ErrorKind::AddrNotAvailable
    )
}
