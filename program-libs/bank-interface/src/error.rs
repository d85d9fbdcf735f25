use thiserror::Error;

pub type Result<T> = std::result::Result<T, BankInterfaceError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankInterfaceError {
    #[error("Invalid seeds: {0}")]
    InvalidSeed(String),

    #[error("Invalid bank name: {0}")]
    InvalidName(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Malformed bank account: {0}")]
    MalformedAccount(String),

    #[error("Program schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<BankInterfaceError> for u32 {
    fn from(e: BankInterfaceError) -> u32 {
        match e {
            BankInterfaceError::InvalidSeed(_) => 6001,
            BankInterfaceError::InvalidName(_) => 6002,
            BankInterfaceError::InvalidAmount(_) => 6003,
            BankInterfaceError::MalformedAccount(_) => 6004,
            BankInterfaceError::SchemaMismatch(_) => 6005,
            BankInterfaceError::Serialization(_) => 6006,
        }
    }
}
