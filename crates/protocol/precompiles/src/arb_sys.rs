//! The chain-info precompile (`ArbSys`).

use crate::{
    ExecutionContext, L1MessageQueue, PendingL1Message, PrecompileError, PrecompileHandler,
    PrecompileResult,
    abi::{SELECTOR_SIZE, encode_address, encode_u64},
    aliasing::apply_l1_to_l2_alias,
    selectors::{arb_sys, split_selector},
};
use alloy_primitives::{Address, Bytes, Selector, address};
use alloy_sol_types::{SolType, sol_data};
use std::sync::Arc;
use tracing::debug;

/// The address `ArbSys` is installed at.
pub const ARB_SYS_ADDRESS: Address = address!("0x0000000000000000000000000000000000000064");

/// The chain id reported by default: Arbitrum One.
pub const DEFAULT_CHAIN_ID: u64 = 42161;

/// The ArbOS version reported by default.
pub const DEFAULT_ARB_OS_VERSION: u64 = 20;

/// Static configuration of the [`ArbSys`] handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfoConfig {
    /// The chain id returned by `arbChainID()`.
    pub chain_id: u64,
    /// The version returned by `arbOSVersion()`.
    pub os_version: u64,
}

impl Default for ChainInfoConfig {
    fn default() -> Self {
        Self { chain_id: DEFAULT_CHAIN_ID, os_version: DEFAULT_ARB_OS_VERSION }
    }
}

/// A call to [`ArbSys`], resolved from its selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbSysCall {
    /// `arbChainID()`
    ChainId,
    /// `arbBlockNumber()`
    BlockNumber,
    /// `arbOSVersion()`
    OsVersion,
    /// `sendToL1(address,bytes)`
    SendToL1,
    /// `mapL1SenderContractAddressToL2Alias(address)`
    MapL1SenderToL2Alias,
    /// A selector `ArbSys` does not answer.
    Unknown(Selector),
}

impl ArbSysCall {
    /// Resolves a selector.
    pub fn from_selector(selector: Selector) -> Self {
        match selector {
            arb_sys::CHAIN_ID => Self::ChainId,
            arb_sys::BLOCK_NUMBER => Self::BlockNumber,
            arb_sys::OS_VERSION => Self::OsVersion,
            arb_sys::SEND_TO_L1 => Self::SendToL1,
            arb_sys::MAP_L1_SENDER_TO_L2_ALIAS => Self::MapL1SenderToL2Alias,
            other => Self::Unknown(other),
        }
    }

    /// The static gas charged for the call.
    pub const fn gas_cost(&self) -> u64 {
        match self {
            Self::ChainId | Self::BlockNumber | Self::OsVersion => 3,
            Self::SendToL1 => 100,
            Self::MapL1SenderToL2Alias => 5,
            Self::Unknown(_) => 0,
        }
    }
}

/// Answers identity queries and records outbound L2 → L1 messages.
///
/// The message queue is shared through an [`Arc`] so the host can inspect or clear it between
/// scenarios while the handler stays installed in a registry.
#[derive(Debug, Default)]
pub struct ArbSys {
    config: ChainInfoConfig,
    queue: Arc<L1MessageQueue>,
}

impl ArbSys {
    /// Creates a handler with its own empty message queue.
    pub fn new(config: ChainInfoConfig) -> Self {
        Self { config, queue: Arc::default() }
    }

    /// Creates a handler appending to an existing queue.
    pub const fn with_queue(config: ChainInfoConfig, queue: Arc<L1MessageQueue>) -> Self {
        Self { config, queue }
    }

    /// Returns the handler configuration.
    pub const fn config(&self) -> &ChainInfoConfig {
        &self.config
    }

    /// Returns the outbound message queue.
    pub const fn queue(&self) -> &Arc<L1MessageQueue> {
        &self.queue
    }

    fn send_to_l1(&self, args: &[u8], ctx: &ExecutionContext) -> PrecompileResult<Bytes> {
        let (destination, data) =
            <(sol_data::Address, sol_data::Bytes)>::abi_decode_params_validate(args)
                .map_err(|e| PrecompileError::InvalidArgument(e.to_string()))?;

        let id = self.queue.push(PendingL1Message {
            from: ctx.caller,
            to: destination,
            value: ctx.call_value,
            data,
            timestamp: ctx.timestamp,
            block_number: ctx.block_number,
            tx_hash: ctx.tx_hash,
        });
        debug!(
            target: "arb_sys",
            id = %id,
            from = %ctx.caller,
            to = %destination,
            value = %ctx.call_value,
            "Recorded outbound L1 message"
        );
        Ok(encode_u64(id.as_u64()))
    }

    fn map_l1_sender_to_l2_alias(args: &[u8]) -> PrecompileResult<Bytes> {
        let l1 = sol_data::Address::abi_decode_validate(args)
            .map_err(|e| PrecompileError::InvalidArgument(e.to_string()))?;
        Ok(encode_address(apply_l1_to_l2_alias(l1)))
    }
}

impl PrecompileHandler for ArbSys {
    fn address(&self) -> Address {
        ARB_SYS_ADDRESS
    }

    fn name(&self) -> &'static str {
        "ArbSys"
    }

    fn call(&self, input: &[u8], ctx: &ExecutionContext) -> PrecompileResult<Bytes> {
        let (selector, args) = split_selector(input).ok_or(PrecompileError::InvalidCalldata {
            expected: SELECTOR_SIZE,
            actual: input.len(),
        })?;

        match ArbSysCall::from_selector(selector) {
            ArbSysCall::ChainId => Ok(encode_u64(self.config.chain_id)),
            ArbSysCall::BlockNumber => Ok(encode_u64(ctx.block_number)),
            ArbSysCall::OsVersion => Ok(encode_u64(self.config.os_version)),
            ArbSysCall::SendToL1 => self.send_to_l1(args, ctx),
            ArbSysCall::MapL1SenderToL2Alias => Self::map_l1_sender_to_l2_alias(args),
            ArbSysCall::Unknown(selector) => {
                Err(PrecompileError::UnknownSelector { precompile: self.name(), selector })
            }
        }
    }

    fn gas_cost(&self, input: &[u8]) -> u64 {
        split_selector(input)
            .map_or(0, |(selector, _)| ArbSysCall::from_selector(selector).gas_cost())
    }
}
