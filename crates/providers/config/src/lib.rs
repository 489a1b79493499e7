#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod errors;
pub use errors::{ConfigError, ConfigFetchError};

mod file;
pub use file::{DEFAULT_CACHE_TTL, DEFAULT_FETCH_TIMEOUT, GasConfig, ShimConfig};

mod fetcher;
pub use fetcher::{PriceFetcher, RpcPriceFetcher};

mod cache;
pub use cache::{LiveSnapshot, PriceCache};

mod resolver;
pub use resolver::{ConfigResolver, ConfigSource, Precompiles, ResolvedConfig};
