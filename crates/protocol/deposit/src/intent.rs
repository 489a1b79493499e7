//! The execution-intent record handed to the host for a validated deposit.

use alloy_primitives::{Address, Bytes, TxKind, U256};

/// What the host has to execute for a validated [`DepositTransaction`].
///
/// [`DepositTransaction`]: crate::DepositTransaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionIntent {
    /// The account the call is made from.
    pub caller: Address,
    /// A call to an address or a contract creation.
    pub kind: TxKind,
    /// The value credited to the caller before execution, in wei.
    pub mint: U256,
    /// The value transferred with the call, in wei.
    pub value: U256,
    /// The gas limit of the execution.
    pub gas_limit: u64,
    /// The call input or init code.
    pub input: Bytes,
}

impl ExecutionIntent {
    /// Returns `true` if the intent creates a contract.
    pub fn is_create(&self) -> bool {
        self.kind.is_create()
    }

    /// The recipient of the call, or `None` for a creation.
    pub fn to(&self) -> Option<&Address> {
        self.kind.to()
    }
}
