//! Decode Deposit Subcommand

use alloy_primitives::Bytes;
use anyhow::{Context, Result};
use arb_shim_deposit::{DepositProcessor, ProcessedDeposit};
use clap::Parser;
use tracing::info;

/// The `decode-deposit` Subcommand
///
/// Decodes and validates a raw `0x7e` deposit transaction and prints what the host would execute.
///
/// # Usage
///
/// ```sh
/// arb-shim decode-deposit 0x7ef8...
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Decodes and validates a deposit transaction.")]
pub struct DecodeDepositCommand {
    /// The raw envelope, type byte included, in hex.
    pub raw: Bytes,
}

impl DecodeDepositCommand {
    /// Decodes and validates the envelope.
    pub fn process(&self) -> Result<ProcessedDeposit> {
        DepositProcessor::new().process(&self.raw).context("Rejected deposit transaction")
    }

    /// Runs the subcommand.
    pub fn run(&self) -> Result<()> {
        let processed = self.process()?;
        info!(target: "shim", tx_hash = %processed.tx_hash, "Decoded deposit");

        let tx = &processed.transaction;
        println!("txHash: {}", processed.tx_hash);
        println!("sourceHash: {}", tx.source_hash);
        println!("from: {}", tx.from);
        match tx.to {
            Some(to) => println!("to: {to}"),
            None => println!("to: (contract creation)"),
        }
        println!("mint: {}", tx.mint);
        println!("value: {}", tx.value);
        println!("gasLimit: {}", tx.gas_limit);
        println!("isCreation: {}", tx.is_creation);
        println!("data: {}", tx.data);
        println!("intrinsicGas: {}", processed.intrinsic_gas);
        Ok(())
    }
}
