//! Error types for the `arb-shim-config` crate.

use arb_shim_precompiles::PrecompileError;
use core::time::Duration;
use std::path::PathBuf;
use thiserror::Error;

/// An error loading, saving or validating a [`ShimConfig`](crate::ShimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        /// The path of the file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for the expected schema.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// A value that must be non-zero is zero.
    #[error("Config field `{0}` must be non-zero")]
    ZeroValue(&'static str),
    /// The configured price array does not have exactly six entries.
    #[error("Config field `gas.pricesInWei` must have 6 entries, got {0}")]
    InvalidPriceCount(usize),
}

/// A failed live-network fetch.
///
/// These errors never escape the [`ConfigResolver`](crate::ConfigResolver): they are logged and the
/// resolver falls through to the next source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigFetchError {
    /// The RPC transport failed.
    #[error("RPC request failed: {0}")]
    Transport(String),
    /// The endpoint answered with something that is not a six-word price tuple.
    #[error("Failed to decode price tuple: {0}")]
    Decode(#[from] PrecompileError),
    /// The endpoint did not answer in time.
    #[error("Live fetch timed out after {0:?}")]
    Timeout(Duration),
    /// A concurrent fetch of the same endpoint failed while this request was waiting for it.
    #[error("Concurrent fetch of {0} failed")]
    SharedFailure(String),
}
