//! Call Subcommand

use crate::flags::GlobalArgs;
use alloy_primitives::{Address, B256, Bytes, U256};
use anyhow::{Result, anyhow};
use arb_shim_precompiles::ExecutionContext;
use clap::Parser;
use tracing::debug;

/// The `call` Subcommand
///
/// Dispatches calldata to a precompile built from the resolved configuration and prints the
/// ABI-encoded result.
///
/// # Usage
///
/// ```sh
/// arb-shim call --to 0x000000000000000000000000000000000000006c --data 0x41b247a8
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Dispatches a call to an emulated precompile.")]
pub struct CallCommand {
    /// The precompile address, in hex.
    #[arg(long)]
    pub to: Address,
    /// The calldata, selector included, in hex.
    #[arg(long, default_value = "0x")]
    pub data: Bytes,
    /// The immediate caller.
    #[arg(long, default_value_t = Address::ZERO)]
    pub caller: Address,
    /// The current L2 block number.
    #[arg(long = "block-number", default_value_t = 0)]
    pub block_number: u64,
    /// The current block timestamp.
    #[arg(long, default_value_t = 0)]
    pub timestamp: u64,
    /// The value attached to the call, in wei.
    #[arg(long, default_value_t = U256::ZERO)]
    pub value: U256,
    /// The gas price of the enclosing transaction, in wei.
    #[arg(long = "gas-price", default_value_t = U256::ZERO)]
    pub gas_price: U256,
    /// The hash of the enclosing transaction.
    #[arg(long = "tx-hash", default_value_t = B256::ZERO)]
    pub tx_hash: B256,
}

impl CallCommand {
    /// Builds the execution context of the call on `chain_id`.
    pub fn context(&self, chain_id: u64) -> ExecutionContext {
        ExecutionContext::new(self.block_number, chain_id, self.caller)
            .with_timestamp(self.timestamp)
            .with_call_value(self.value)
            .with_gas_price(self.gas_price)
            .with_tx_hash(self.tx_hash)
    }

    /// Runs the subcommand.
    pub async fn run(&self, args: &GlobalArgs) -> Result<()> {
        let resolved = args.resolver()?.resolve().await;
        let precompiles = resolved.build_precompiles();
        let ctx = self.context(resolved.chain_id);

        let output = precompiles
            .registry
            .dispatch(self.to, &self.data, &ctx)
            .map_err(|err| anyhow!("call reverted: {err}"))?;
        debug!(target: "shim", to = %self.to, len = output.len(), "Call returned");

        if let Some(gas) = precompiles.registry.gas_cost(&self.to, &self.data) {
            println!("gas: {gas}");
        }
        println!("output: {output}");
        Ok(())
    }
}
