//! The JSON configuration file model.

use crate::ConfigError;
use alloy_primitives::U256;
use arb_shim_precompiles::{
    ChainInfoConfig, DEFAULT_ARB_OS_VERSION, DEFAULT_L1_BASE_FEE, GasPriceComponents,
    GasPriceModel, PriceTuple,
};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// The default lifetime of a cached live fetch.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// The default bound on a live fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// The gas section of a [`ShimConfig`].
///
/// Numeric values are strings holding a decimal or `0x`-prefixed hex integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasConfig {
    /// A complete price tuple, adopted verbatim when no live endpoint answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices_in_wei: Option<Vec<U256>>,
    /// The L2 base fee, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_base_fee: Option<U256>,
    /// The L1 gas charged per non-zero calldata byte.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_calldata_cost_per_byte: Option<U256>,
    /// The L1 storage cost, in gas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_storage_cost: Option<U256>,
    /// The congestion fee, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion_fee: Option<U256>,
    /// The L1 blob base fee estimate, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_blob_base_fee: Option<U256>,
}

/// The shim configuration file.
///
/// Every field is optional. Missing values fall back to the built-in defaults of the precompiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimConfig {
    /// The chain id reported by `ArbSys`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// The ArbOS version reported by `ArbSys`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arb_os_version: Option<u64>,
    /// The L1 base fee used by the fee model, in wei.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1_base_fee: Option<U256>,
    /// Gas pricing.
    #[serde(default)]
    pub gas: GasConfig,
    /// A JSON-RPC endpoint to read live prices from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_rpc: Option<Url>,
    /// How long a live fetch stays cached, in seconds. `0` disables the cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
    /// The bound on a live fetch, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_ms: Option<u64>,
}

impl ShimConfig {
    /// Reads and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to `path` as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    /// Checks the values the precompiles cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id == Some(0) {
            return Err(ConfigError::ZeroValue("chainId"));
        }
        if self.arb_os_version == Some(0) {
            return Err(ConfigError::ZeroValue("arbOsVersion"));
        }
        if self.l1_base_fee.is_some_and(|fee| fee.is_zero()) {
            return Err(ConfigError::ZeroValue("l1BaseFee"));
        }
        if self.gas.l2_base_fee.is_some_and(|fee| fee.is_zero()) {
            return Err(ConfigError::ZeroValue("gas.l2BaseFee"));
        }
        if self.gas.l1_calldata_cost_per_byte.is_some_and(|cost| cost.is_zero()) {
            return Err(ConfigError::ZeroValue("gas.l1CalldataCostPerByte"));
        }
        if let Some(prices) = &self.gas.prices_in_wei &&
            prices.len() != PriceTuple::LEN
        {
            return Err(ConfigError::InvalidPriceCount(prices.len()));
        }
        Ok(())
    }

    /// The price tuple supplied by the file, if it holds a well-formed one.
    pub fn file_prices(&self) -> Option<PriceTuple> {
        self.gas.prices_in_wei.as_deref().and_then(|prices| PriceTuple::try_from_slice(prices).ok())
    }

    /// The fee model, with missing values taken from the defaults.
    pub fn gas_price_model(&self) -> GasPriceModel {
        let defaults = GasPriceComponents::default();
        let components = GasPriceComponents {
            l2_base_fee: self.gas.l2_base_fee.unwrap_or(defaults.l2_base_fee),
            l1_calldata_cost_per_byte: self
                .gas
                .l1_calldata_cost_per_byte
                .unwrap_or(defaults.l1_calldata_cost_per_byte),
            l1_storage_cost: self.gas.l1_storage_cost.unwrap_or(defaults.l1_storage_cost),
            congestion_fee: self.gas.congestion_fee.unwrap_or(defaults.congestion_fee),
        };
        GasPriceModel::new(components, self.l1_base_fee.unwrap_or(DEFAULT_L1_BASE_FEE))
    }

    /// The ArbOS version, or the default.
    pub fn arb_os_version(&self) -> u64 {
        self.arb_os_version.unwrap_or(DEFAULT_ARB_OS_VERSION)
    }

    /// The chain-info configuration implied by the file alone.
    pub fn chain_info(&self) -> ChainInfoConfig {
        let defaults = ChainInfoConfig::default();
        ChainInfoConfig {
            chain_id: self.chain_id.unwrap_or(defaults.chain_id),
            os_version: self.arb_os_version(),
        }
    }

    /// The cache lifetime of a live fetch.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl_secs.map_or(DEFAULT_CACHE_TTL, Duration::from_secs)
    }

    /// The bound on a live fetch.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout_ms.map_or(DEFAULT_FETCH_TIMEOUT, Duration::from_millis)
    }
}
