//! Alias Subcommand

use alloy_primitives::Address;
use anyhow::Result;
use arb_shim_precompiles::{apply_l1_to_l2_alias, undo_l1_to_l2_alias};
use clap::Parser;

/// The `alias` Subcommand
///
/// Prints the L2 alias of an L1 contract address, or the L1 address behind an alias.
///
/// # Usage
///
/// ```sh
/// arb-shim alias 0x0000000000000000000000000000000000000001
/// arb-shim alias --undo 0x1111000000000000000000000000000000001112
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Maps an L1 contract address to its L2 alias.")]
pub struct AliasCommand {
    /// The address to map.
    pub address: Address,
    /// Map an L2 alias back to its L1 address.
    #[arg(long)]
    pub undo: bool,
}

impl AliasCommand {
    /// The mapped address.
    pub fn mapped(&self) -> Address {
        if self.undo { undo_l1_to_l2_alias(self.address) } else { apply_l1_to_l2_alias(self.address) }
    }

    /// Runs the subcommand.
    pub fn run(&self) -> Result<()> {
        println!("{}", self.mapped());
        Ok(())
    }
}
