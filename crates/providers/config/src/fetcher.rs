//! Live-network price fetching.

use crate::ConfigFetchError;
use alloy_primitives::Bytes;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::TransactionRequest;
use arb_shim_precompiles::{ARB_GAS_INFO_ADDRESS, PriceTuple, selectors::arb_gas_info};
use async_trait::async_trait;
use core::fmt::Debug;
use tracing::warn;
use url::Url;

/// Reads the price tuple and chain id from a live network.
#[async_trait]
pub trait PriceFetcher: Debug + Send + Sync {
    /// The endpoint this fetcher reads from. Results are cached under this key.
    fn endpoint(&self) -> &Url;

    /// Fetches the current `getPricesInWei()` tuple.
    async fn fetch_prices(&self) -> Result<PriceTuple, ConfigFetchError>;

    /// Fetches the chain id.
    async fn fetch_chain_id(&self) -> Result<u64, ConfigFetchError>;
}

/// A [`PriceFetcher`] that calls the gas-info precompile of a JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcPriceFetcher {
    endpoint: Url,
    provider: RootProvider,
}

impl RpcPriceFetcher {
    /// Creates a fetcher over HTTP.
    pub fn new_http(endpoint: Url) -> Self {
        let provider = RootProvider::new_http(endpoint.clone());
        Self { endpoint, provider }
    }

    /// Creates a fetcher over an existing client. `endpoint` is used as the cache key.
    pub fn new(endpoint: Url, client: RpcClient) -> Self {
        Self { endpoint, provider: RootProvider::new(client) }
    }
}

#[async_trait]
impl PriceFetcher for RpcPriceFetcher {
    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn fetch_prices(&self) -> Result<PriceTuple, ConfigFetchError> {
        let request = TransactionRequest::default()
            .to(ARB_GAS_INFO_ADDRESS)
            .input(Bytes::copy_from_slice(arb_gas_info::GET_PRICES_IN_WEI.as_slice()).into());
        let output = self.provider.call(request).await.map_err(|err| {
            warn!(target: "config", endpoint = %self.endpoint, %err, "eth_call to ArbGasInfo failed");
            ConfigFetchError::Transport(err.to_string())
        })?;
        Ok(PriceTuple::decode(&output)?)
    }

    async fn fetch_chain_id(&self) -> Result<u64, ConfigFetchError> {
        self.provider.get_chain_id().await.map_err(|err| {
            warn!(target: "config", endpoint = %self.endpoint, %err, "eth_chainId failed");
            ConfigFetchError::Transport(err.to_string())
        })
    }
}
