//! Fixed-width word encoding shared by the precompile handlers.
//!
//! Every scalar return value is a single 32-byte big-endian word, tuple returns are the
//! concatenation of their words in declared order and addresses are left-padded to a full word.

use crate::{PrecompileError, PrecompileResult};
use alloy_primitives::{Address, Bytes, U256};

/// The size of a single ABI word.
pub const WORD_SIZE: usize = 32;

/// The size of a function selector.
pub const SELECTOR_SIZE: usize = 4;

/// Encodes a single [`U256`] as a 32-byte big-endian word.
pub fn encode_word(value: U256) -> Bytes {
    Bytes::from(value.to_be_bytes::<WORD_SIZE>())
}

/// Encodes a `u64` as a 32-byte big-endian word.
pub fn encode_u64(value: u64) -> Bytes {
    encode_word(U256::from(value))
}

/// Encodes a sequence of [`U256`] values as consecutive 32-byte words.
pub fn encode_words(values: &[U256]) -> Bytes {
    let mut out = Vec::with_capacity(values.len() * WORD_SIZE);
    for value in values {
        out.extend_from_slice(&value.to_be_bytes::<WORD_SIZE>());
    }
    out.into()
}

/// Encodes an [`Address`] left-padded to a 32-byte word.
pub fn encode_address(address: Address) -> Bytes {
    Bytes::from(address.into_word().0)
}

/// Decodes exactly `N` consecutive 32-byte words.
///
/// Returns [`PrecompileError::InvalidCalldata`] if `data` is not exactly `N * 32` bytes long.
pub fn decode_words<const N: usize>(data: &[u8]) -> PrecompileResult<[U256; N]> {
    if data.len() != N * WORD_SIZE {
        return Err(PrecompileError::InvalidCalldata {
            expected: N * WORD_SIZE,
            actual: data.len(),
        });
    }
    let mut words = [U256::ZERO; N];
    for (word, chunk) in words.iter_mut().zip(data.chunks_exact(WORD_SIZE)) {
        *word = U256::from_be_slice(chunk);
    }
    Ok(words)
}

/// Byte-weight classification of a calldata buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteWeights {
    /// The number of bytes equal to `0x00`.
    pub zero: u64,
    /// The number of bytes not equal to `0x00`.
    pub non_zero: u64,
}

impl ByteWeights {
    /// Counts the zero and non-zero bytes of `data`.
    pub fn count(data: &[u8]) -> Self {
        let zero = data.iter().filter(|b| **b == 0).count() as u64;
        Self { zero, non_zero: data.len() as u64 - zero }
    }

    /// The total number of classified bytes.
    pub const fn total(&self) -> u64 {
        self.zero + self.non_zero
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};

    #[test]
    fn test_encode_word_is_big_endian() {
        let word = encode_u64(0x0102);
        assert_eq!(word.len(), WORD_SIZE);
        assert_eq!(&word[30..], &[0x01, 0x02]);
        assert!(word[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_address_is_left_padded() {
        let addr = address!("0x1111000000000000000000000000000000001112");
        let word = encode_address(addr);
        assert_eq!(word.len(), WORD_SIZE);
        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], addr.as_slice());
    }

    #[test]
    fn test_decode_words_preserves_order() {
        let encoded = encode_words(&[U256::from(1), U256::from(2), U256::from(3)]);
        let words = decode_words::<3>(&encoded).unwrap();
        assert_eq!(words, [U256::from(1), U256::from(2), U256::from(3)]);
    }

    #[test]
    fn test_decode_words_rejects_wrong_length() {
        let err = decode_words::<6>(&hex!("00ff")).unwrap_err();
        assert_eq!(err, PrecompileError::InvalidCalldata { expected: 192, actual: 2 });
    }

    #[test]
    fn test_byte_weights() {
        let weights = ByteWeights::count(&[0, 1, 0, 0xff, 0]);
        assert_eq!(weights, ByteWeights { zero: 3, non_zero: 2 });
        assert_eq!(weights.total(), 5);
        assert_eq!(ByteWeights::count(&[]), ByteWeights::default());
    }
}
