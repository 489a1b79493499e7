//! Contains the [`PrecompileRegistry`], which routes calls to handlers by address.

use crate::{
    ArbGasInfo, ArbSys, ExecutionContext, PrecompileError, PrecompileHandler, PrecompileResult,
};
use alloy_primitives::{Address, Bytes, map::HashMap};
use core::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Maps fixed addresses to the handlers answering calls made to them.
///
/// Handlers are stored behind [`Arc`]s so the host can keep its own reference (for instance to
/// reseed [`ArbGasInfo`] or inspect the [`ArbSys`] message queue) after installing them.
#[derive(Debug, Clone, Default)]
pub struct PrecompileRegistry {
    handlers: HashMap<Address, Arc<dyn PrecompileHandler>>,
}

impl PrecompileRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `ArbSys` and `ArbGasInfo` installed.
    pub fn with_handlers(arb_sys: Arc<ArbSys>, arb_gas_info: Arc<ArbGasInfo>) -> Self {
        let mut registry = Self::new();
        registry.handlers.insert(arb_sys.address(), arb_sys);
        registry.handlers.insert(arb_gas_info.address(), arb_gas_info);
        registry
    }

    /// Installs `handler` at its address.
    ///
    /// Registering a second handler at an occupied address is a programming error and fails with
    /// [`PrecompileError::DuplicatePrecompile`], leaving the existing handler in place.
    pub fn register(&mut self, handler: Arc<dyn PrecompileHandler>) -> PrecompileResult<()> {
        let address = handler.address();
        if self.handlers.contains_key(&address) {
            return Err(PrecompileError::DuplicatePrecompile(address));
        }
        debug!(target: "precompiles", %address, name = handler.name(), "Registered precompile");
        self.handlers.insert(address, handler);
        Ok(())
    }

    /// Returns the handler installed at `address`.
    pub fn handler(&self, address: &Address) -> Option<&Arc<dyn PrecompileHandler>> {
        self.handlers.get(address)
    }

    /// Returns `true` if a handler is installed at `address`.
    pub fn contains(&self, address: &Address) -> bool {
        self.handlers.contains_key(address)
    }

    /// Returns the addresses of every installed handler, sorted ascending.
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<_> = self.handlers.keys().copied().collect();
        addresses.sort_unstable();
        addresses
    }

    /// The number of installed handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is installed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Routes a call to the handler at `address`.
    ///
    /// Every failure is returned as a [`PrecompileError`] for the host to turn into a reverted
    /// call.
    pub fn dispatch(
        &self,
        address: Address,
        input: &[u8],
        ctx: &ExecutionContext,
    ) -> PrecompileResult<Bytes> {
        let handler =
            self.handlers.get(&address).ok_or(PrecompileError::UnknownPrecompile(address))?;
        handler.call(input, ctx).inspect_err(|e| {
            debug!(
                target: "precompiles",
                precompile = handler.name(),
                error = %e,
                "Precompile call reverted"
            );
        })
    }

    /// Routes a call to the handler at the hex-encoded `address`.
    ///
    /// Hex digits are matched case-insensitively, so `0x…6c` and `0x…6C` resolve to the same
    /// handler.
    pub fn dispatch_at(
        &self,
        address: &str,
        input: &[u8],
        ctx: &ExecutionContext,
    ) -> PrecompileResult<Bytes> {
        let address = Address::from_str(address.trim()).map_err(|e| {
            PrecompileError::InvalidArgument(format!("invalid address {address:?}: {e}"))
        })?;
        self.dispatch(address, input, ctx)
    }

    /// The static gas charged by the handler at `address` for `input`, if one is installed.
    pub fn gas_cost(&self, address: &Address, input: &[u8]) -> Option<u64> {
        self.handlers.get(address).map(|handler| handler.gas_cost(input))
    }
}
