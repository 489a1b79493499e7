//! Error types for the `arb-shim-deposit` crate.

use crate::DepositField;
use thiserror::Error;

/// Why an envelope could not be split into its RLP fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The input is empty.
    #[error("empty input")]
    Empty,
    /// The leading byte is not the deposit type marker.
    #[error("expected type 0x7e, got {0:#04x}")]
    UnexpectedType(u8),
    /// The body after the type marker is not an RLP list.
    #[error("body is not an RLP list")]
    NotAList,
    /// An RLP header could not be read.
    #[error("invalid RLP header: {0}")]
    Header(alloy_rlp::Error),
    /// The list or one of its items claims more bytes than are present.
    #[error("truncated: {needed} bytes needed, {available} available")]
    Truncated {
        /// The number of bytes the header announces.
        needed: usize,
        /// The number of bytes left in the input.
        available: usize,
    },
    /// Bytes follow the RLP list.
    #[error("{0} trailing bytes after the RLP list")]
    TrailingBytes(usize),
}

/// An error returned while decoding a deposit envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepositError {
    /// The envelope framing is invalid.
    #[error("Malformed deposit envelope: {0}")]
    MalformedEnvelope(#[from] EnvelopeError),
    /// The RLP list does not hold exactly the expected number of fields.
    #[error("Expected {expected} deposit fields, got {actual}")]
    FieldCountMismatch {
        /// The expected number of fields.
        expected: usize,
        /// The number of fields found.
        actual: usize,
    },
    /// A field does not decode to its declared type or width.
    #[error("Deposit field `{field}` has the wrong type: {reason}")]
    FieldTypeMismatch {
        /// The offending field.
        field: DepositField,
        /// The underlying RLP error.
        reason: alloy_rlp::Error,
    },
}

/// A single semantic rule broken by a deposit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationViolation {
    /// A contract creation carries a recipient.
    #[error("contract creation must not have a recipient")]
    CreationWithRecipient,
    /// A call has no recipient.
    #[error("call must have a recipient")]
    CallWithoutRecipient,
    /// The gas limit is zero.
    #[error("gas limit must be non-zero")]
    ZeroGasLimit,
}

/// Every rule a deposit transaction breaks, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid deposit transaction: {}", format_violations(.violations))]
pub struct DepositValidationError {
    /// The violated rules. Never empty.
    pub violations: Vec<ValidationViolation>,
}

impl DepositValidationError {
    /// Returns `true` if `violation` is among the reported violations.
    pub fn contains(&self, violation: ValidationViolation) -> bool {
        self.violations.contains(&violation)
    }
}

fn format_violations(violations: &[ValidationViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// An error returned by the [`DepositProcessor`](crate::DepositProcessor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepositProcessingError {
    /// The raw bytes did not decode.
    #[error(transparent)]
    Decode(#[from] DepositError),
    /// The decoded transaction breaks a semantic rule.
    #[error(transparent)]
    Validation(#[from] DepositValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_lists_every_violation() {
        let err = DepositValidationError {
            violations: vec![
                ValidationViolation::CallWithoutRecipient,
                ValidationViolation::ZeroGasLimit,
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid deposit transaction: call must have a recipient, gas limit must be non-zero"
        );
        assert!(err.contains(ValidationViolation::ZeroGasLimit));
        assert!(!err.contains(ValidationViolation::CreationWithRecipient));
    }

    #[test]
    fn test_envelope_error_display() {
        let err = DepositError::from(EnvelopeError::UnexpectedType(0x02));
        assert_eq!(err.to_string(), "Malformed deposit envelope: expected type 0x7e, got 0x02");
    }
}
