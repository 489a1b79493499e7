//! A TTL cache of live fetches with per-endpoint single-flight.

use crate::ConfigFetchError;
use arb_shim_precompiles::PriceTuple;
use core::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::time::Instant;
use tracing::debug;
use url::Url;

/// The values read from a live endpoint in one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSnapshot {
    /// The `getPricesInWei()` tuple.
    pub prices: PriceTuple,
    /// The chain id, if the endpoint reported one.
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone)]
struct Outcome {
    finished_at: Instant,
    result: Result<LiveSnapshot, ConfigFetchError>,
}

/// The per-endpoint state. `generation` is bumped under the `last` lock every time a fetch
/// completes, so a waiter can tell whether a fetch finished while it was queued.
#[derive(Debug, Default)]
struct Slot {
    generation: AtomicU64,
    last: tokio::sync::Mutex<Option<Outcome>>,
}

/// Caches successful live fetches for a fixed TTL, keyed by endpoint.
///
/// Callers for the same endpoint are serialised: while one fetch is in flight the others wait for
/// it and then share its outcome instead of issuing their own. A failed fetch is shared too, so
/// every waiter falls through at once. A TTL of zero disables caching but keeps the sharing.
#[derive(Debug)]
pub struct PriceCache {
    ttl: Duration,
    slots: Mutex<HashMap<Url, Arc<Slot>>>,
}

impl PriceCache {
    /// Creates an empty cache.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slots: Mutex::default() }
    }

    /// The lifetime of a cached fetch.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns `true` if successful fetches are kept for reuse.
    pub const fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Returns the cached snapshot for `endpoint` if it is still fresh, or runs `fetch`.
    ///
    /// `fetch` is only polled by the caller that holds the endpoint slot. Callers that queued
    /// behind it receive its result; a failure reaches them as [`ConfigFetchError::SharedFailure`].
    pub async fn get_or_fetch<F, Fut>(
        &self,
        endpoint: &Url,
        fetch: F,
    ) -> Result<LiveSnapshot, ConfigFetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LiveSnapshot, ConfigFetchError>>,
    {
        let slot = self.slot(endpoint);
        let seen = slot.generation.load(Ordering::Acquire);
        let mut last = slot.last.lock().await;

        if let Some(outcome) = last.as_ref() {
            if slot.generation.load(Ordering::Acquire) != seen {
                debug!(target: "config", %endpoint, "Sharing result of concurrent fetch");
                return outcome
                    .result
                    .clone()
                    .map_err(|_| ConfigFetchError::SharedFailure(endpoint.to_string()));
            }
            if let Ok(snapshot) = outcome.result &&
                self.is_enabled() &&
                outcome.finished_at.elapsed() < self.ttl
            {
                debug!(target: "config", %endpoint, "Live price cache hit");
                return Ok(snapshot);
            }
        }

        let result = fetch().await;
        *last = Some(Outcome { finished_at: Instant::now(), result: result.clone() });
        slot.generation.fetch_add(1, Ordering::Release);
        result
    }

    fn slot(&self, endpoint: &Url) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(endpoint.clone()).or_default().clone()
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(crate::DEFAULT_CACHE_TTL)
    }
}
