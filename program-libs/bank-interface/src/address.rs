use solana_pubkey::Pubkey;

use crate::{
    constants::{BANK_SEED, MAX_SEEDS, MAX_SEED_LEN},
    error::{BankInterfaceError, Result},
};

/// Finds the program-derived address for `seeds` under `program_id`.
///
/// Returns the canonical (highest) bump whose address lies off the ed25519
/// curve, so no private key can exist for it.
///
/// # Examples
///
/// ```
/// use bank_interface::{derive_address, ID};
///
/// let owner = solana_pubkey::Pubkey::new_from_array([1; 32]);
/// let (address, bump) = derive_address(&[b"bankaccount", owner.as_ref()], &ID).unwrap();
/// assert_eq!(
///     bank_interface::create_address_with_bump(&[b"bankaccount", owner.as_ref()], bump, &ID),
///     Ok(address)
/// );
/// ```
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    check_seeds(seeds)?;
    Pubkey::try_find_program_address(seeds, program_id).ok_or_else(|| {
        BankInterfaceError::InvalidSeed("no bump yields an off-curve address".to_string())
    })
}

/// Recomputes an address from a known bump.
pub fn create_address_with_bump(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    check_seeds(seeds)?;
    let bump_seed = [bump];
    let mut seeds_with_bump = seeds.to_vec();
    seeds_with_bump.push(&bump_seed);
    Pubkey::create_program_address(&seeds_with_bump, program_id).map_err(|e| {
        BankInterfaceError::InvalidSeed(format!("bump {} gives no valid address: {}", bump, e))
    })
}

/// Address of the bank owned by `owner`: seeds `["bankaccount", owner]`.
pub fn derive_bank_address(owner: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive_address(&[BANK_SEED, owner.as_ref()], program_id)
}

fn check_seeds(seeds: &[&[u8]]) -> Result<()> {
    // One slot is reserved for the bump seed.
    if seeds.len() >= MAX_SEEDS {
        return Err(BankInterfaceError::InvalidSeed(format!(
            "{} seeds provided, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(BankInterfaceError::InvalidSeed(format!(
            "seed {} is {} bytes, at most {} allowed",
            index,
            seed.len(),
            MAX_SEED_LEN
        )));
    }
    Ok(())
}
