/// Literal tag prefixed to the owner key when deriving a bank address.
pub const BANK_SEED: &[u8] = b"bankaccount";

/// Name given to banks created without an explicit name.
pub const DEFAULT_BANK_NAME: &str = "WSOS Bank";

/// Upper bound on the UTF-8 byte length of a bank name.
pub const MAX_NAME_LEN: usize = 64;

/// discriminator + name length prefix + name + balance
pub const BANK_ACCOUNT_SPACE: usize = 8 + 4 + MAX_NAME_LEN + 8;

/// Maximum number of seeds accepted by the ledger, the bump seed included.
pub const MAX_SEEDS: usize = 16;

/// Maximum byte length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// 0.1 SOL, the amount moved by a single "deposit" action.
pub const DEFAULT_DEPOSIT_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10;
