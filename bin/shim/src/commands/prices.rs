//! Prices Subcommand

use crate::flags::GlobalArgs;
use anyhow::Result;
use arb_shim_precompiles::PriceField;
use clap::Parser;
use tracing::info;

const FIELDS: [(PriceField, &str); 6] = [
    (PriceField::L2BaseFee, "l2BaseFee"),
    (PriceField::L1BaseFeeEstimate, "l1BaseFeeEstimate"),
    (PriceField::L1CalldataCost, "l1CalldataCost"),
    (PriceField::L1StorageCost, "l1StorageCost"),
    (PriceField::CongestionFee, "congestionFee"),
    (PriceField::Aux, "aux"),
];

/// The `prices` Subcommand
///
/// Resolves the `getPricesInWei()` tuple and the chain id, and prints them with their sources.
///
/// # Usage
///
/// ```sh
/// arb-shim --live-rpc http://127.0.0.1:8547 prices
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Resolves and prints the gas price tuple.")]
pub struct PricesCommand;

impl PricesCommand {
    /// Runs the subcommand.
    pub async fn run(&self, args: &GlobalArgs) -> Result<()> {
        let resolved = args.resolver()?.resolve().await;
        info!(target: "shim", source = %resolved.prices_source, "Resolved price tuple");

        println!("source: {}", resolved.prices_source);
        println!("chainId: {} ({})", resolved.chain_id, resolved.chain_id_source);
        println!("arbOsVersion: {}", resolved.arb_os_version);
        for (field, name) in FIELDS {
            println!("{name}: {}", resolved.prices.get(field));
        }
        Ok(())
    }
}
