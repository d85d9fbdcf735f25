use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    constants::MAX_NAME_LEN,
    discriminator::{Discriminator, DISCRIMINATOR_LEN},
    error::{BankInterfaceError, Result},
    schema::{BANK_PROGRAM_SCHEMA, CREATE, DEPOSIT},
};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateInstructionData {
    pub name: String,
}

impl Discriminator for CreateInstructionData {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = CREATE.discriminator;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct DepositInstructionData {
    pub amount: u64,
}

impl Discriminator for DepositInstructionData {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = DEPOSIT.discriminator;
}

/// Decoded instruction data of the bank program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankInstruction {
    Create(CreateInstructionData),
    Deposit(DepositInstructionData),
}

impl BankInstruction {
    pub fn try_from_slice(data: &[u8]) -> Result<Self> {
        let layout = BANK_PROGRAM_SCHEMA
            .instruction_for_data(data)
            .ok_or_else(|| {
                BankInterfaceError::Serialization("unknown instruction discriminator".to_string())
            })?;
        let mut payload = &data[DISCRIMINATOR_LEN..];
        let instruction = match layout.name {
            "create" => BankInstruction::Create(deserialize(&mut payload)?),
            "deposit" => BankInstruction::Deposit(deserialize(&mut payload)?),
            name => {
                return Err(BankInterfaceError::Serialization(format!(
                    "no decoder for instruction `{}`",
                    name
                )))
            }
        };
        if !payload.is_empty() {
            return Err(BankInterfaceError::Serialization(format!(
                "{} trailing bytes after instruction data",
                payload.len()
            )));
        }
        Ok(instruction)
    }
}

/// `create` instruction data: discriminator, u32 length prefix, UTF-8 name.
pub fn encode_create_args(name: &str) -> Result<Vec<u8>> {
    check_name(name)?;
    encode(&CreateInstructionData {
        name: name.to_string(),
    })
}

/// `deposit` instruction data: discriminator, little-endian u64 amount.
pub fn encode_deposit_args(amount: u64) -> Result<Vec<u8>> {
    if amount == 0 {
        return Err(BankInterfaceError::InvalidAmount(
            "deposit amount must be greater than zero".to_string(),
        ));
    }
    encode(&DepositInstructionData { amount })
}

pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BankInterfaceError::InvalidName(
            "name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(BankInterfaceError::InvalidName(format!(
            "name is {} bytes, at most {} allowed",
            name.len(),
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn encode<T: Discriminator + BorshSerialize>(args: &T) -> Result<Vec<u8>> {
    let mut data = T::DISCRIMINATOR.to_vec();
    args.serialize(&mut data)
        .map_err(|e| BankInterfaceError::Serialization(e.to_string()))?;
    Ok(data)
}

fn deserialize<T: BorshDeserialize>(payload: &mut &[u8]) -> Result<T> {
    T::deserialize(payload).map_err(|e| BankInterfaceError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_create_args_vector() {
        let data = encode_create_args("WSOS Bank").unwrap();
        let expected: Vec<u8> = [
            &[24, 30, 200, 40, 5, 28, 7, 119][..],
            &[9, 0, 0, 0],
            b"WSOS Bank",
        ]
        .concat();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_encode_deposit_args_vector() {
        let data = encode_deposit_args(100_000_000).unwrap();
        assert_eq!(
            data,
            vec![242, 35, 198, 137, 82, 225, 242, 182, 0x00, 0xe1, 0xf5, 0x05, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_zero_deposit_rejected() {
        assert!(matches!(
            encode_deposit_args(0),
            Err(BankInterfaceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_name_bounds() {
        assert!(encode_create_args("").is_err());
        assert!(encode_create_args(&"a".repeat(MAX_NAME_LEN)).is_ok());
        assert_eq!(
            encode_create_args(&"a".repeat(MAX_NAME_LEN + 1)),
            Err(BankInterfaceError::InvalidName(
                "name is 65 bytes, at most 64 allowed".to_string()
            ))
        );
        // Bound is in bytes, not characters.
        assert!(encode_create_args(&"é".repeat(MAX_NAME_LEN / 2 + 1)).is_err());
    }

    #[test]
    fn test_decode_instruction() {
        let create = encode_create_args("WSOS Bank").unwrap();
        assert_eq!(
            BankInstruction::try_from_slice(&create).unwrap(),
            BankInstruction::Create(CreateInstructionData {
                name: "WSOS Bank".to_string()
            })
        );
        let deposit = encode_deposit_args(42).unwrap();
        assert_eq!(
            BankInstruction::try_from_slice(&deposit).unwrap(),
            BankInstruction::Deposit(DepositInstructionData { amount: 42 })
        );

        let mut trailing = deposit.clone();
        trailing.push(0);
        assert!(BankInstruction::try_from_slice(&trailing).is_err());
        assert!(BankInstruction::try_from_slice(&deposit[..12]).is_err());
        assert!(BankInstruction::try_from_slice(&[0; 16]).is_err());
    }
}
