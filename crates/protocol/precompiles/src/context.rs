//! The per-call execution environment supplied by the host.

use alloy_primitives::{Address, B256, U256};

/// The environment of a single precompile call.
///
/// Built by the host for every call and never mutated by the handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// The current L2 block number.
    pub block_number: u64,
    /// The chain id the host VM is running with.
    pub chain_id: u64,
    /// The gas price of the enclosing transaction, in wei.
    pub gas_price_wei: U256,
    /// The immediate caller of the precompile.
    pub caller: Address,
    /// The call stack leading to the precompile, outermost first.
    pub call_stack: Vec<Address>,
    /// The current block timestamp.
    pub timestamp: u64,
    /// The value attached to the precompile call, in wei.
    pub call_value: U256,
    /// The hash of the enclosing transaction.
    pub tx_hash: B256,
}

impl ExecutionContext {
    /// Creates a context for `caller` at `block_number` on `chain_id`.
    pub fn new(block_number: u64, chain_id: u64, caller: Address) -> Self {
        Self { block_number, chain_id, caller, ..Default::default() }
    }

    /// Sets the gas price of the enclosing transaction.
    pub const fn with_gas_price(mut self, gas_price_wei: U256) -> Self {
        self.gas_price_wei = gas_price_wei;
        self
    }

    /// Sets the call stack.
    pub fn with_call_stack(mut self, call_stack: Vec<Address>) -> Self {
        self.call_stack = call_stack;
        self
    }

    /// Sets the block timestamp.
    pub const fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the value attached to the call.
    pub const fn with_call_value(mut self, call_value: U256) -> Self {
        self.call_value = call_value;
        self
    }

    /// Sets the enclosing transaction hash.
    pub const fn with_tx_hash(mut self, tx_hash: B256) -> Self {
        self.tx_hash = tx_hash;
        self
    }

    /// Returns the outermost caller, falling back to the immediate caller for an empty stack.
    pub fn origin(&self) -> Address {
        self.call_stack.first().copied().unwrap_or(self.caller)
    }
}
