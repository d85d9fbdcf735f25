pub mod errors;
pub mod ledger_transport;
pub mod solana_rpc;

pub use errors::RpcError;
pub use ledger_transport::LedgerTransport;
pub use solana_rpc::{RetryConfig, SolanaRpcTransport, SolanaRpcUrl};
