//! Resolution of the price tuple and chain id from their prioritised sources.

use crate::{
    ConfigError, ConfigFetchError, LiveSnapshot, PriceCache, PriceFetcher, RpcPriceFetcher,
    ShimConfig,
};
use alloy_primitives::U256;
use arb_shim_precompiles::{
    ArbGasInfo, ArbSys, ChainInfoConfig, DEFAULT_CHAIN_ID, GasInfoConfig, GasPriceModel,
    PrecompileRegistry, PriceTuple,
};
use core::{fmt, time::Duration};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// Read from the configured live endpoint.
    LiveNetwork,
    /// Taken from the configuration file.
    LocalFile,
    /// The built-in constant.
    BuiltInFallback,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiveNetwork => f.write_str("live-network"),
            Self::LocalFile => f.write_str("local-file"),
            Self::BuiltInFallback => f.write_str("built-in-fallback"),
        }
    }
}

/// The outcome of a resolution: every value the precompiles are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The initial price tuple of `ArbGasInfo`.
    pub prices: PriceTuple,
    /// Where `prices` came from.
    pub prices_source: ConfigSource,
    /// The chain id reported by `ArbSys`.
    pub chain_id: u64,
    /// Where `chain_id` came from.
    pub chain_id_source: ConfigSource,
    /// The ArbOS version reported by `ArbSys`.
    pub arb_os_version: u64,
    /// The fee model used for `getCurrentTxL1GasFees()`.
    pub model: GasPriceModel,
    /// The L1 blob base fee estimate, in wei.
    pub l1_blob_base_fee: Option<U256>,
}

impl ResolvedConfig {
    /// The `ArbSys` configuration.
    pub const fn chain_info_config(&self) -> ChainInfoConfig {
        ChainInfoConfig { chain_id: self.chain_id, os_version: self.arb_os_version }
    }

    /// The `ArbGasInfo` configuration, starting from the resolved tuple.
    pub fn gas_info_config(&self) -> GasInfoConfig {
        let mut config = GasInfoConfig::new(self.model).with_prices(self.prices);
        if let Some(fee) = self.l1_blob_base_fee {
            config.l1_blob_base_fee = fee;
        }
        config
    }

    /// Builds both handlers and a registry holding them.
    pub fn build_precompiles(&self) -> Precompiles {
        let arb_sys = Arc::new(ArbSys::new(self.chain_info_config()));
        let arb_gas_info = Arc::new(ArbGasInfo::new(self.gas_info_config()));
        let registry = PrecompileRegistry::with_handlers(arb_sys.clone(), arb_gas_info.clone());
        Precompiles { registry, arb_sys, arb_gas_info }
    }
}

/// A registry together with handles to the handlers it holds.
#[derive(Debug, Clone)]
pub struct Precompiles {
    /// The registry, with `ArbSys` and `ArbGasInfo` installed.
    pub registry: PrecompileRegistry,
    /// The installed `ArbSys`.
    pub arb_sys: Arc<ArbSys>,
    /// The installed `ArbGasInfo`.
    pub arb_gas_info: Arc<ArbGasInfo>,
}

/// Resolves configuration from, in order: a live endpoint, the configuration file, and the
/// built-in constants.
///
/// Resolution never fails. A live fetch that errors or exceeds the timeout is logged and the next
/// source is used.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config: ShimConfig,
    fetcher: Option<Arc<dyn PriceFetcher>>,
    cache: Arc<PriceCache>,
    timeout: Duration,
}

impl ConfigResolver {
    /// Creates a resolver for `config`, reading live prices over HTTP if `liveRpc` is set.
    pub fn new(config: ShimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fetcher = config
            .live_rpc
            .clone()
            .map(|url| Arc::new(RpcPriceFetcher::new_http(url)) as Arc<dyn PriceFetcher>);
        Ok(Self {
            cache: Arc::new(PriceCache::new(config.cache_ttl())),
            timeout: config.fetch_timeout(),
            config,
            fetcher,
        })
    }

    /// Replaces the live fetcher.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PriceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Shares `cache` with other resolvers.
    pub fn with_cache(mut self, cache: Arc<PriceCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the bound on a live fetch.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The file configuration.
    pub const fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// Resolves the price tuple alone.
    pub async fn resolve_prices(&self) -> (PriceTuple, ConfigSource) {
        let resolved = self.resolve().await;
        (resolved.prices, resolved.prices_source)
    }

    /// Resolves every value the precompiles need.
    pub async fn resolve(&self) -> ResolvedConfig {
        let live = self.fetch_live().await;

        let (prices, prices_source) = match (live, self.config.file_prices()) {
            (Some(snapshot), _) => (snapshot.prices, ConfigSource::LiveNetwork),
            (None, Some(prices)) => (prices, ConfigSource::LocalFile),
            (None, None) => (PriceTuple::FALLBACK, ConfigSource::BuiltInFallback),
        };
        let (chain_id, chain_id_source) =
            match (live.and_then(|snapshot| snapshot.chain_id), self.config.chain_id) {
                (Some(chain_id), _) => (chain_id, ConfigSource::LiveNetwork),
                (None, Some(chain_id)) => (chain_id, ConfigSource::LocalFile),
                (None, None) => (DEFAULT_CHAIN_ID, ConfigSource::BuiltInFallback),
            };

        info!(
            target: "config",
            %prices_source,
            chain_id,
            %chain_id_source,
            "Resolved precompile configuration"
        );
        ResolvedConfig {
            prices,
            prices_source,
            chain_id,
            chain_id_source,
            arb_os_version: self.config.arb_os_version(),
            model: self.config.gas_price_model(),
            l1_blob_base_fee: self.config.gas.l1_blob_base_fee,
        }
    }

    async fn fetch_live(&self) -> Option<LiveSnapshot> {
        let Some(fetcher) = self.fetcher.as_ref() else {
            debug!(target: "config", "No live endpoint configured");
            return None;
        };
        let endpoint = fetcher.endpoint();
        let timeout = self.timeout;

        let result = self
            .cache
            .get_or_fetch(endpoint, || async move {
                tokio::time::timeout(timeout, fetch_snapshot(fetcher.as_ref()))
                    .await
                    .unwrap_or(Err(ConfigFetchError::Timeout(timeout)))
            })
            .await;

        result
            .inspect_err(|err| {
                warn!(target: "config", %endpoint, %err, "Live fetch failed, falling back");
            })
            .ok()
    }
}

/// Reads the prices, then the chain id. Only the prices are required.
async fn fetch_snapshot(fetcher: &dyn PriceFetcher) -> Result<LiveSnapshot, ConfigFetchError> {
    let prices = fetcher.fetch_prices().await?;
    let chain_id = fetcher
        .fetch_chain_id()
        .await
        .inspect_err(|err| {
            debug!(target: "config", %err, "Live chain id unavailable");
        })
        .ok();
    Ok(LiveSnapshot { prices, chain_id })
}
