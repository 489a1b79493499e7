//! The [`DepositTransaction`] type and its field schema.

use crate::{DepositValidationError, ExecutionIntent, ValidationViolation};
use alloy_primitives::{Address, B256, Bytes, TxKind, U256, keccak256};
use core::fmt;

/// The EIP-2718 type byte of a deposit transaction.
pub const DEPOSIT_TX_TYPE: u8 = 0x7e;

/// The fields of a deposit transaction, in wire order.
///
/// This enum is the single definition of the field order used by both the encoder and the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositField {
    /// `sourceHash`, 32 bytes.
    SourceHash,
    /// `from`, 20 bytes.
    From,
    /// `to`, 20 bytes or empty for a contract creation.
    To,
    /// `mint`, an unsigned 256-bit integer.
    Mint,
    /// `value`, an unsigned 256-bit integer.
    Value,
    /// `gasLimit`, an unsigned 64-bit integer.
    GasLimit,
    /// `isCreation`, a boolean.
    IsCreation,
    /// `data`, an arbitrary byte string.
    Data,
}

impl DepositField {
    /// Every field in wire order.
    pub const ALL: [Self; 8] = [
        Self::SourceHash,
        Self::From,
        Self::To,
        Self::Mint,
        Self::Value,
        Self::GasLimit,
        Self::IsCreation,
        Self::Data,
    ];

    /// The number of fields in the RLP list.
    pub const COUNT: usize = Self::ALL.len();

    /// The wire name of the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SourceHash => "sourceHash",
            Self::From => "from",
            Self::To => "to",
            Self::Mint => "mint",
            Self::Value => "value",
            Self::GasLimit => "gasLimit",
            Self::IsCreation => "isCreation",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for DepositField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A deposit transaction: an L1-originated action applied on L2.
///
/// The wire form is `0x7e || rlp([sourceHash, from, to, mint, value, gasLimit, isCreation, data])`.
/// See [`DepositTransaction::encode`] and [`DepositTransaction::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DepositTransaction {
    /// Uniquely identifies the L1 origin of the deposit.
    pub source_hash: B256,
    /// The sender on L2.
    pub from: Address,
    /// The recipient, or `None` for a contract creation.
    pub to: Option<Address>,
    /// The value minted on L2, in wei.
    pub mint: U256,
    /// The value transferred to the recipient, in wei.
    pub value: U256,
    /// The L2 gas limit.
    pub gas_limit: u64,
    /// Whether the transaction creates a contract.
    pub is_creation: bool,
    /// The call input or init code.
    pub data: Bytes,
}

impl DepositTransaction {
    /// Checks the semantic rules of a deposit, reporting every violation at once.
    ///
    /// - `to` is empty if and only if `is_creation` is set.
    /// - `gas_limit` is non-zero.
    ///
    /// The sender is always a well-formed 20-byte address; anything else is rejected while
    /// decoding.
    pub fn validate(&self) -> Result<(), DepositValidationError> {
        let mut violations = Vec::new();
        match (self.is_creation, self.to.is_some()) {
            (true, true) => violations.push(ValidationViolation::CreationWithRecipient),
            (false, false) => violations.push(ValidationViolation::CallWithoutRecipient),
            _ => {}
        }
        if self.gas_limit == 0 {
            violations.push(ValidationViolation::ZeroGasLimit);
        }

        if violations.is_empty() { Ok(()) } else { Err(DepositValidationError { violations }) }
    }

    /// The transaction hash: keccak256 of the full envelope, type byte included.
    pub fn tx_hash(&self) -> B256 {
        keccak256(self.encode())
    }

    /// Returns the transaction kind implied by `is_creation` and `to`, if they agree.
    pub const fn kind(&self) -> Option<TxKind> {
        match (self.is_creation, self.to) {
            (true, None) => Some(TxKind::Create),
            (false, Some(to)) => Some(TxKind::Call(to)),
            _ => None,
        }
    }

    /// Validates the transaction and describes what the host has to execute.
    pub fn execution_intent(&self) -> Result<ExecutionIntent, DepositValidationError> {
        self.validate()?;
        let kind = self.kind().ok_or_else(|| DepositValidationError {
            violations: vec![if self.is_creation {
                ValidationViolation::CreationWithRecipient
            } else {
                ValidationViolation::CallWithoutRecipient
            }],
        })?;
        Ok(ExecutionIntent {
            caller: self.from,
            kind,
            mint: self.mint,
            value: self.value,
            gas_limit: self.gas_limit,
            input: self.data.clone(),
        })
    }
}

/// Derives the source hash of a deposit from the L1 event that produced it.
///
/// `keccak256(l1_tx_hash || be64(l1_block_number) || be64(l1_log_index))`
pub fn source_hash_from_l1(l1_tx_hash: B256, l1_block_number: u64, l1_log_index: u64) -> B256 {
    let mut preimage = [0u8; 48];
    preimage[..32].copy_from_slice(l1_tx_hash.as_slice());
    preimage[32..40].copy_from_slice(&l1_block_number.to_be_bytes());
    preimage[40..].copy_from_slice(&l1_log_index.to_be_bytes());
    keccak256(preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use rstest::rstest;

    fn call() -> DepositTransaction {
        DepositTransaction {
            source_hash: b256!("0x0101010101010101010101010101010101010101010101010101010101010101"),
            from: address!("0x1234567890123456789012345678901234567890"),
            to: Some(address!("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd")),
            mint: U256::ZERO,
            value: U256::from(1_000_000_000_000_000_000u64),
            gas_limit: 100_000,
            is_creation: false,
            data: Bytes::from_static(&[0x60, 0x2b, 0x57, 0xfd]),
        }
    }

    #[test]
    fn test_field_schema_order() {
        let names: Vec<_> = DepositField::ALL.iter().map(DepositField::name).collect();
        assert_eq!(
            names,
            ["sourceHash", "from", "to", "mint", "value", "gasLimit", "isCreation", "data"]
        );
        assert_eq!(DepositField::COUNT, 8);
    }

    #[rstest]
    #[case::call(false, true, 1, None)]
    #[case::creation(true, false, 1, None)]
    #[case::creation_with_recipient(true, true, 1, Some(ValidationViolation::CreationWithRecipient))]
    #[case::call_without_recipient(false, false, 1, Some(ValidationViolation::CallWithoutRecipient))]
    #[case::zero_gas(false, true, 0, Some(ValidationViolation::ZeroGasLimit))]
    fn test_validate(
        #[case] is_creation: bool,
        #[case] has_recipient: bool,
        #[case] gas_limit: u64,
        #[case] expected: Option<ValidationViolation>,
    ) {
        let tx = DepositTransaction {
            is_creation,
            to: has_recipient.then_some(Address::with_last_byte(1)),
            gas_limit,
            ..call()
        };
        match expected {
            None => tx.validate().unwrap(),
            Some(violation) => assert_eq!(
                tx.validate().unwrap_err(),
                DepositValidationError { violations: vec![violation] }
            ),
        }
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let tx = DepositTransaction { to: None, gas_limit: 0, ..call() };
        let err = tx.validate().unwrap_err();
        assert_eq!(
            err.violations,
            vec![ValidationViolation::CallWithoutRecipient, ValidationViolation::ZeroGasLimit]
        );
    }

    #[test]
    fn test_execution_intent() {
        let tx = call();
        let intent = tx.execution_intent().unwrap();
        assert_eq!(intent.caller, tx.from);
        assert_eq!(intent.kind, TxKind::Call(address!("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd")));
        assert_eq!(intent.value, tx.value);
        assert_eq!(intent.gas_limit, 100_000);
        assert_eq!(intent.input, tx.data);

        let creation = DepositTransaction { to: None, is_creation: true, ..call() };
        assert!(creation.execution_intent().unwrap().is_create());

        let invalid = DepositTransaction { to: None, ..call() };
        assert!(invalid.execution_intent().is_err());
    }

    #[test]
    fn test_source_hash_from_l1() {
        let l1_tx_hash = B256::repeat_byte(1);
        let hash = source_hash_from_l1(l1_tx_hash, 12345, 0);

        let mut preimage = l1_tx_hash.to_vec();
        preimage.extend_from_slice(&12345u64.to_be_bytes());
        preimage.extend_from_slice(&0u64.to_be_bytes());
        assert_eq!(hash, keccak256(&preimage));
        assert_ne!(hash, source_hash_from_l1(l1_tx_hash, 12345, 1));
    }

    #[test]
    fn test_tx_hash_commits_to_every_field() {
        let tx = call();
        let bumped = DepositTransaction { gas_limit: tx.gas_limit + 1, ..tx.clone() };
        assert_eq!(tx.tx_hash(), keccak256(tx.encode()));
        assert_ne!(tx.tx_hash(), bumped.tx_hash());
    }
}
