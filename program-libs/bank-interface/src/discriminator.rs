use sha2::{Digest, Sha256};

use crate::error::{BankInterfaceError, Result};

pub const DISCRIMINATOR_LEN: usize = 8;

pub trait Discriminator {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        Self::DISCRIMINATOR
    }
}

/// First eight bytes of `sha256(preimage)`.
pub fn hash_discriminator(preimage: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash: [u8; 32] = Sha256::digest(preimage.as_bytes()).into();
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    discriminator
}

/// Checks that `data` starts with `T`'s discriminator and returns the rest.
pub fn strip_discriminator<T: Discriminator>(data: &[u8]) -> Result<&[u8]> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(BankInterfaceError::MalformedAccount(format!(
            "{} bytes is shorter than the discriminator",
            data.len()
        )));
    }
    let (discriminator, rest) = data.split_at(DISCRIMINATOR_LEN);
    if discriminator != T::DISCRIMINATOR {
        return Err(BankInterfaceError::MalformedAccount(format!(
            "discriminator {:?} does not match expected {:?}",
            discriminator,
            T::DISCRIMINATOR
        )));
    }
    Ok(rest)
}
