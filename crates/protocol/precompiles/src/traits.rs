//! The [`PrecompileHandler`] trait implemented by every emulated precompile.

use crate::{ExecutionContext, PrecompileResult};
use alloy_primitives::{Address, Bytes};
use core::fmt::Debug;

/// A native handler answering calls made to a fixed precompile address.
pub trait PrecompileHandler: Debug + Send + Sync {
    /// The address the handler is installed at.
    fn address(&self) -> Address;

    /// A human readable name, used for diagnostics.
    fn name(&self) -> &'static str;

    /// Answers a call with the given `input` and returns the ABI-encoded result.
    fn call(&self, input: &[u8], ctx: &ExecutionContext) -> PrecompileResult<Bytes>;

    /// The static gas charged for a call with the given `input`.
    ///
    /// Inputs that do not resolve to a known function cost nothing.
    fn gas_cost(&self, input: &[u8]) -> u64;
}
