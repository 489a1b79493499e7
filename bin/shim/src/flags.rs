//! Global flags shared by every subcommand.

use alloy_primitives::U256;
use anyhow::{Context, Result};
use arb_shim_cli::{LogArgs, LogConfig};
use arb_shim_config::{ConfigResolver, ShimConfig};
use clap::Args;
use std::path::PathBuf;
use url::Url;

/// Global arguments: logging, the configuration file and its overrides.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct GlobalArgs {
    /// Logging flags.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Path to the JSON configuration file.
    #[arg(long = "config", global = true, env = "ARB_SHIM_CONFIG")]
    pub config: Option<PathBuf>,
    /// JSON-RPC endpoint to read live prices and the chain id from.
    #[arg(long = "live-rpc", global = true, env = "ARB_SHIM_LIVE_RPC")]
    pub live_rpc: Option<Url>,
    /// Overrides the configured chain id.
    #[arg(long = "chain-id", global = true, env = "ARB_SHIM_CHAIN_ID")]
    pub chain_id: Option<u64>,
    /// Overrides the configured ArbOS version.
    #[arg(long = "arbos-version", global = true, env = "ARB_SHIM_ARBOS_VERSION")]
    pub arb_os_version: Option<u64>,
    /// Overrides the configured L1 base fee, in wei.
    #[arg(long = "l1-base-fee", global = true, env = "ARB_SHIM_L1_BASE_FEE")]
    pub l1_base_fee: Option<U256>,
}

impl GlobalArgs {
    /// Initializes the tracing subscriber.
    pub fn init_logs(&self) -> Result<()> {
        LogConfig::new(self.log_args.clone()).init_tracing_subscriber(None)?;
        Ok(())
    }

    /// Loads the configuration file, if any, and applies the flag overrides on top of it.
    pub fn load_config(&self) -> Result<ShimConfig> {
        let mut config = match &self.config {
            Some(path) => ShimConfig::from_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => ShimConfig::default(),
        };

        if let Some(live_rpc) = &self.live_rpc {
            config.live_rpc = Some(live_rpc.clone());
        }
        config.chain_id = self.chain_id.or(config.chain_id);
        config.arb_os_version = self.arb_os_version.or(config.arb_os_version);
        config.l1_base_fee = self.l1_base_fee.or(config.l1_base_fee);

        config.validate().context("Invalid configuration overrides")?;
        Ok(config)
    }

    /// Builds a resolver over the effective configuration.
    pub fn resolver(&self) -> Result<ConfigResolver> {
        Ok(ConfigResolver::new(self.load_config()?)?)
    }
}
