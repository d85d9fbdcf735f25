#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    io,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use async_trait::async_trait;
use bank_client::rpc::{LedgerTransport, RetryConfig, RpcError};
use bank_interface::{
    constants::BANK_ACCOUNT_SPACE, derive_bank_address, instruction_data::BankInstruction,
    BankAccount, BankInterfaceError, SYSTEM_PROGRAM_ID,
};
use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    rent::Rent,
    signature::Signature,
    transaction::{self, Transaction, TransactionError},
};

pub const FEE_LAMPORTS: u64 = 5_000;

fn blockhash() -> Hash {
    Hash::new_from_array([9; 32])
}

/// Lamports a new bank account must hold to be rent exempt.
pub fn bank_rent() -> u64 {
    Rent::default().minimum_balance(BANK_ACCOUNT_SPACE)
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Account>,
    statuses: HashMap<Signature, transaction::Result<()>>,
    send_attempts: usize,
    landed: usize,
    fail_next_send: bool,
    time_out_next_send: bool,
    lose_next_send_response: bool,
    drop_confirmations: bool,
    fail_enumeration: bool,
    failing_fetches: HashSet<Pubkey>,
    hidden_from_fetch: HashSet<Pubkey>,
}

/// In-memory ledger running the bank program's `create` and `deposit`.
///
/// Transactions execute when sent. A failing transaction is returned as a
/// [`TransactionError`] from `send_transaction`, like a preflight failure, and
/// leaves no state behind.
#[derive(Debug, Clone)]
pub struct TestLedger {
    program_id: Pubkey,
    state: Arc<Mutex<LedgerState>>,
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new(bank_interface::ID)
    }
}

impl TestLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Arc::new(Mutex::new(LedgerState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn airdrop(&self, address: &Pubkey, lamports: u64) {
        let mut state = self.state();
        let account = state.accounts.entry(*address).or_insert_with(|| Account {
            lamports: 0,
            data: Vec::new(),
            owner: SYSTEM_PROGRAM_ID,
            executable: false,
            rent_epoch: 0,
        });
        account.lamports += lamports;
    }

    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.state()
            .accounts
            .get(address)
            .map(|account| account.lamports)
            .unwrap_or_default()
    }

    /// Inserts an account owned by the ledger's program with arbitrary data.
    pub fn insert_raw_account(&self, address: Pubkey, data: Vec<u8>) {
        self.insert_account(address, self.program_id, data);
    }

    pub fn insert_account(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.state().accounts.insert(
            address,
            Account {
                lamports: bank_rent(),
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    /// Places a bank for `owner` directly in ledger state.
    pub fn insert_bank(&self, owner: &Pubkey, name: &str, balance: u64) -> Pubkey {
        let (bank, _) = derive_bank_address(owner, &self.program_id).unwrap();
        let data = BankAccount::new(name, balance)
            .unwrap()
            .to_account_data()
            .unwrap();
        self.insert_raw_account(bank, data);
        bank
    }

    pub fn bank(&self, address: &Pubkey) -> Option<BankAccount> {
        self.state()
            .accounts
            .get(address)
            .filter(|account| account.owner == self.program_id)
            .map(|account| BankAccount::try_from_account_data(&account.data).unwrap())
    }

    pub fn send_attempts(&self) -> usize {
        self.state().send_attempts
    }

    pub fn landed_transactions(&self) -> usize {
        self.state().landed
    }

    /// The next send fails before reaching the ledger.
    pub fn fail_next_send(&self) {
        self.state().fail_next_send = true;
    }

    /// The next send times out before the node receives it.
    pub fn time_out_next_send(&self) {
        self.state().time_out_next_send = true;
    }

    /// The next transaction lands but its send times out on the way back.
    pub fn lose_next_send_response(&self) {
        self.state().lose_next_send_response = true;
    }

    /// Transactions still land but their status is never reported.
    pub fn drop_confirmations(&self, drop: bool) {
        self.state().drop_confirmations = drop;
    }

    pub fn fail_enumeration(&self, fail: bool) {
        self.state().fail_enumeration = fail;
    }

    pub fn fail_account_fetch(&self, address: Pubkey) {
        self.state().failing_fetches.insert(address);
    }

    /// Enumerated but gone by the time it is fetched.
    pub fn hide_from_fetch(&self, address: Pubkey) {
        self.state().hidden_from_fetch.insert(address);
    }
}

fn unreachable_node() -> RpcError {
    RpcError::from(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

fn timed_out() -> RpcError {
    RpcError::from(io::Error::new(io::ErrorKind::TimedOut, "request timed out"))
}

fn debit(accounts: &mut HashMap<Pubkey, Account>, address: &Pubkey, lamports: u64) -> bool {
    match accounts.get_mut(address) {
        Some(account) if account.lamports >= lamports => {
            account.lamports -= lamports;
            true
        }
        _ => false,
    }
}

fn execute(
    accounts: &mut HashMap<Pubkey, Account>,
    program_id: &Pubkey,
    transaction: &Transaction,
) -> transaction::Result<()> {
    transaction.verify()?;
    let message = &transaction.message;
    if message.recent_blockhash != blockhash() {
        return Err(TransactionError::BlockhashNotFound);
    }
    let keys = &message.account_keys;
    let payer = keys.first().ok_or(TransactionError::AccountNotFound)?;
    if !debit(accounts, payer, FEE_LAMPORTS) {
        return Err(TransactionError::InsufficientFundsForFee);
    }

    for (index, compiled) in message.instructions.iter().enumerate() {
        let fail = |error: InstructionError| TransactionError::InstructionError(index as u8, error);

        if keys[compiled.program_id_index as usize] != *program_id {
            return Err(fail(InstructionError::IncorrectProgramId));
        }
        if compiled.accounts.len() != 3 {
            return Err(fail(InstructionError::NotEnoughAccountKeys));
        }
        let bank = keys[compiled.accounts[0] as usize];
        let user = keys[compiled.accounts[1] as usize];
        if !message.is_signer(compiled.accounts[1] as usize) {
            return Err(fail(InstructionError::MissingRequiredSignature));
        }
        if keys[compiled.accounts[2] as usize] != SYSTEM_PROGRAM_ID {
            return Err(fail(InstructionError::IncorrectProgramId));
        }

        let custom = |e: BankInterfaceError| fail(InstructionError::Custom(u32::from(e)));
        match BankInstruction::try_from_slice(&compiled.data).map_err(custom)? {
            BankInstruction::Create(args) => {
                let (expected, _) = derive_bank_address(&user, program_id).map_err(custom)?;
                if bank != expected {
                    return Err(fail(InstructionError::InvalidSeeds));
                }
                if accounts.contains_key(&bank) {
                    return Err(fail(InstructionError::AccountAlreadyInitialized));
                }
                let rent = bank_rent();
                if !debit(accounts, &user, rent) {
                    return Err(fail(InstructionError::InsufficientFunds));
                }
                let data = BankAccount::new(&args.name, 0)
                    .and_then(|account| account.to_account_data())
                    .map_err(custom)?;
                accounts.insert(
                    bank,
                    Account {
                        lamports: rent,
                        data,
                        owner: *program_id,
                        executable: false,
                        rent_epoch: 0,
                    },
                );
            }
            BankInstruction::Deposit(args) => {
                let mut state = match accounts.get(&bank) {
                    Some(account) if account.owner == *program_id => {
                        BankAccount::try_from_account_data(&account.data)
                            .map_err(|_| fail(InstructionError::InvalidAccountData))?
                    }
                    _ => return Err(fail(InstructionError::UninitializedAccount)),
                };
                state.deposit(args.amount).map_err(custom)?;
                if !debit(accounts, &user, args.amount) {
                    return Err(fail(InstructionError::InsufficientFunds));
                }
                let data = state.to_account_data().map_err(custom)?;
                if let Some(account) = accounts.get_mut(&bank) {
                    account.lamports += args.amount;
                    account.data = data;
                }
            }
        }
    }
    Ok(())
}

#[async_trait]
impl LedgerTransport for TestLedger {
    fn url(&self) -> String {
        "test://ledger".to_string()
    }

    fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: 1,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_millis(50),
        }
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(blockhash())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, RpcError> {
        let mut state = self.state();
        state.send_attempts += 1;
        if state.fail_next_send {
            state.fail_next_send = false;
            return Err(unreachable_node());
        }
        if state.time_out_next_send {
            state.time_out_next_send = false;
            return Err(timed_out());
        }
        let signature = *transaction
            .signatures
            .first()
            .ok_or_else(|| RpcError::CustomError("transaction has no signature".to_string()))?;

        let mut accounts = state.accounts.clone();
        execute(&mut accounts, &self.program_id, transaction)?;
        state.accounts = accounts;
        state.landed += 1;
        if !state.drop_confirmations {
            state.statuses.insert(signature, Ok(()));
        }
        if state.lose_next_send_response {
            state.lose_next_send_response = false;
            return Err(timed_out());
        }
        Ok(signature)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<transaction::Result<()>>, RpcError> {
        Ok(self.state().statuses.get(signature).cloned())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> Result<Vec<(Pubkey, Account)>, RpcError> {
        let state = self.state();
        if state.fail_enumeration {
            return Err(unreachable_node());
        }
        Ok(state
            .accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .map(|(address, account)| (*address, account.clone()))
            .collect())
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, RpcError> {
        let state = self.state();
        if state.failing_fetches.contains(address) {
            return Err(unreachable_node());
        }
        if state.hidden_from_fetch.contains(address) {
            return Ok(None);
        }
        Ok(state.accounts.get(address).cloned())
    }
}
