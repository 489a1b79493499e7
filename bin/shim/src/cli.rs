//! Contains the shim CLI.

use crate::{
    commands::{AliasCommand, CallCommand, DecodeDepositCommand, PricesCommand},
    flags::GlobalArgs,
};
use anyhow::Result;
use arb_shim_cli::cli_styles;
use clap::{Parser, Subcommand};

/// Subcommands for the CLI.
#[derive(Debug, PartialEq, Eq, Clone, Subcommand)]
pub enum Commands {
    /// Resolves and prints the gas price tuple.
    #[command(alias = "p")]
    Prices(PricesCommand),
    /// Dispatches a call to an emulated precompile.
    #[command(alias = "c")]
    Call(CallCommand),
    /// Maps an L1 contract address to its L2 alias.
    #[command(alias = "a")]
    Alias(AliasCommand),
    /// Decodes and validates a deposit transaction.
    #[command(alias = "d", alias = "deposit")]
    DecodeDeposit(DecodeDepositCommand),
}

/// The shim CLI.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub subcommand: Commands,
    /// Global arguments for the CLI.
    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Runs the CLI.
    pub fn run(self) -> Result<()> {
        self.global.init_logs()?;

        match self.subcommand {
            Commands::Prices(prices) => Self::run_until_ctrl_c(prices.run(&self.global)),
            Commands::Call(call) => Self::run_until_ctrl_c(call.run(&self.global)),
            Commands::Alias(alias) => alias.run(),
            Commands::DecodeDeposit(deposit) => deposit.run(),
        }
    }

    /// Run until ctrl-c is pressed.
    pub fn run_until_ctrl_c<F>(fut: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        let rt = Self::tokio_runtime().map_err(|e| anyhow::anyhow!(e))?;
        rt.block_on(async move {
            tokio::select! {
                res = fut => res,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(target: "shim", "Received Ctrl-C, shutting down...");
                    Ok(())
                }
            }
        })
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }
}
