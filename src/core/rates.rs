//! Loading and caching of the exchange-rate table.

use super::currency::{CurrencyCode, ExchangeRateTable, RateSource};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Where the rates of a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub table: ExchangeRateTable,
    pub origin: RateOrigin,
    pub updated_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn fallback() -> Self {
        Self {
            table: ExchangeRateTable::fallback(),
            origin: RateOrigin::Fallback,
            updated_at: Utc::now(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.origin == RateOrigin::Live
    }
}

/// Fetches a rate table from a live source, bounded by a timeout.
///
/// Fetch failures never escape: any error, non-success answer or timeout
/// yields the static table.
#[derive(Clone)]
pub struct RateLoader {
    source: Option<Arc<dyn RateSource>>,
    timeout: Duration,
}

impl RateLoader {
    pub fn new(source: Arc<dyn RateSource>, timeout: Duration) -> Self {
        Self {
            source: Some(source),
            timeout,
        }
    }

    /// A loader that never touches the network.
    pub fn offline() -> Self {
        Self {
            source: None,
            timeout: Duration::ZERO,
        }
    }

    pub async fn load(&self) -> RateSnapshot {
        let Some(source) = &self.source else {
            debug!("Offline mode, using static rates");
            return RateSnapshot::fallback();
        };

        match tokio::time::timeout(self.timeout, source.fetch_quotes(CurrencyCode::BASE)).await {
            Ok(Ok(quotes)) => {
                debug!(count = quotes.len(), "Received live quotes");
                RateSnapshot {
                    table: ExchangeRateTable::from_base_quotes(&quotes),
                    origin: RateOrigin::Live,
                    updated_at: Utc::now(),
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Rate fetch failed, using static rates");
                RateSnapshot::fallback()
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Rate fetch timed out, using static rates");
                RateSnapshot::fallback()
            }
        }
    }
}

struct CachedSnapshot {
    snapshot: RateSnapshot,
    loaded_at: Instant,
}

/// Process-wide holder of the current rate snapshot.
///
/// The first access loads the table. After that the snapshot is served from
/// memory until it is older than `refresh_interval`, at which point the next
/// access reloads it. A `None` interval keeps the first snapshot until
/// [`RateCache::refresh`] is called.
///
/// Reloads are serialized: readers that find the snapshot stale at the same
/// time share a single fetch.
pub struct RateCache {
    loader: RateLoader,
    refresh_interval: Option<Duration>,
    current: RwLock<Option<CachedSnapshot>>,
    reload_gate: Mutex<()>,
}

impl RateCache {
    pub fn new(loader: RateLoader, refresh_interval: Option<Duration>) -> Self {
        Self {
            loader,
            refresh_interval,
            current: RwLock::new(None),
            reload_gate: Mutex::new(()),
        }
    }

    /// Creates the cache and loads it right away.
    pub async fn load(loader: RateLoader, refresh_interval: Option<Duration>) -> Self {
        let cache = Self::new(loader, refresh_interval);
        cache.refresh().await;
        cache
    }

    /// Returns the cached snapshot, reloading it first when missing or stale.
    pub async fn snapshot(&self) -> RateSnapshot {
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("Rate cache HIT");
            return snapshot;
        }

        let _gate = self.reload_gate.lock().await;
        // Another reader may have reloaded while we waited for the gate
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("Rate cache HIT after concurrent reload");
            return snapshot;
        }
        debug!("Rate cache MISS");
        self.reload().await
    }

    /// Reloads the snapshot regardless of its age.
    pub async fn refresh(&self) -> RateSnapshot {
        let _gate = self.reload_gate.lock().await;
        self.reload().await
    }

    async fn fresh_snapshot(&self) -> Option<RateSnapshot> {
        let current = self.current.read().await;
        current
            .as_ref()
            .filter(|cached| !self.is_stale(cached))
            .map(|cached| cached.snapshot.clone())
    }

    async fn reload(&self) -> RateSnapshot {
        let snapshot = self.loader.load().await;
        info!(origin = ?snapshot.origin, "Exchange rates loaded");
        let mut current = self.current.write().await;
        *current = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            loaded_at: Instant::now(),
        });
        snapshot
    }

    fn is_stale(&self, cached: &CachedSnapshot) -> bool {
        self.refresh_interval
            .is_some_and(|interval| cached.loaded_at.elapsed() >= interval)
    }
}
