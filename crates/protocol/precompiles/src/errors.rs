//! Error types for the `arb-shim-precompiles` crate.

use alloy_primitives::{Address, Selector};
use thiserror::Error;

/// A [`Result`] alias where the error is [`PrecompileError`].
pub type PrecompileResult<T> = Result<T, PrecompileError>;

/// An error returned by precompile registration, dispatch or reseeding.
///
/// Every dispatch-time variant describes a caller-reportable failure. Hosts translate them into a
/// normal reverted-call outcome; none of them should ever abort the embedding process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrecompileError {
    /// No handler is registered at the target address.
    #[error("No precompile registered at {0}")]
    UnknownPrecompile(Address),
    /// A handler is already registered at the address.
    #[error("A precompile is already registered at {0}")]
    DuplicatePrecompile(Address),
    /// The handler does not recognise the function selector.
    #[error("Unknown selector {selector} for precompile {precompile}")]
    UnknownSelector {
        /// The name of the precompile that received the call.
        precompile: &'static str,
        /// The unrecognised selector.
        selector: Selector,
    },
    /// The calldata is too short or has the wrong length for the called function.
    #[error("Invalid calldata: expected {expected} bytes, got {actual}")]
    InvalidCalldata {
        /// The expected (minimum) length in bytes.
        expected: usize,
        /// The actual length in bytes.
        actual: usize,
    },
    /// An argument failed to decode as its declared type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A reseed tuple did not have exactly six elements.
    #[error("Invalid price tuple length: expected 6, got {0}")]
    InvalidTupleLength(usize),
}

impl PrecompileError {
    /// Returns `true` if the error occurred while answering a call and should be surfaced to the
    /// caller as a reverted call.
    pub const fn is_revert(&self) -> bool {
        matches!(
            self,
            Self::UnknownPrecompile(_) |
                Self::UnknownSelector { .. } |
                Self::InvalidCalldata { .. } |
                Self::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::fixed_bytes;

    #[test]
    fn test_dispatch_errors_are_reverts() {
        assert!(PrecompileError::UnknownPrecompile(Address::ZERO).is_revert());
        assert!(
            PrecompileError::UnknownSelector {
                precompile: "ArbSys",
                selector: fixed_bytes!("deadbeef")
            }
            .is_revert()
        );
        assert!(PrecompileError::InvalidCalldata { expected: 4, actual: 0 }.is_revert());
        assert!(PrecompileError::InvalidArgument("bad".into()).is_revert());
        assert!(!PrecompileError::InvalidTupleLength(5).is_revert());
        assert!(!PrecompileError::DuplicatePrecompile(Address::ZERO).is_revert());
    }

    #[test]
    fn test_error_display() {
        let err = PrecompileError::UnknownSelector {
            precompile: "ArbGasInfo",
            selector: fixed_bytes!("deadbeef"),
        };
        assert_eq!(err.to_string(), "Unknown selector 0xdeadbeef for precompile ArbGasInfo");
    }
}
