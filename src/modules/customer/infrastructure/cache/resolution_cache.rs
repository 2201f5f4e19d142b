use crate::modules::customer::domain::{normalize_company_name, CacheEntry, ResolutionSource};
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

type InFlightLookup = Shared<BoxFuture<'static, Option<String>>>;

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Requests that joined a lookup already in flight
    pub coalesced: u64,
    pub entries_count: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Result of a cache-backed resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLookup {
    pub customer_id: Option<String>,
    pub source: ResolutionSource,
    /// True when this caller awaited another caller's lookup
    pub coalesced: bool,
}

struct CacheInner {
    entries: DashMap<String, CacheEntry>,
    // Guards every mutation: entry writes after a lookup and in-flight insert/remove.
    in_flight: Mutex<HashMap<String, InFlightLookup>>,
    hits: AtomicU64,
    misses: AtomicU64,
    coalesced: AtomicU64,
}

/// Process-wide map of normalized company name to customer id.
///
/// Cloning is cheap and every clone shares the same entries, so one instance
/// is built at startup and handed to each resolver. Entries never expire;
/// `clear` is the only way to drop them. Negative answers are not stored.
#[derive(Clone)]
pub struct ResolutionCache {
    inner: Arc<CacheInner>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: DashMap::new(),
                in_flight: Mutex::new(HashMap::new()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
                coalesced: AtomicU64::new(0),
            }),
        }
    }

    /// Cached customer id for a raw company name, if any
    pub fn get(&self, name: &str) -> Option<String> {
        let key = normalize_company_name(name)?;
        self.inner
            .entries
            .get(&key)
            .map(|entry| entry.customer_id.clone())
    }

    /// Full entry for a raw company name, if any
    pub fn entry(&self, name: &str) -> Option<CacheEntry> {
        let key = normalize_company_name(name)?;
        self.inner.entries.get(&key).map(|entry| entry.clone())
    }

    /// Seed a known mapping. Blank names are ignored.
    pub async fn insert(&self, name: &str, customer_id: impl Into<String>) {
        let Some(key) = normalize_company_name(name) else {
            return;
        };
        let _guard = self.inner.in_flight.lock().await;
        self.inner
            .entries
            .insert(key.clone(), CacheEntry::new(key, customer_id.into()));
    }

    /// Resolve `name` from the cache, or through `lookup` on a miss.
    ///
    /// Concurrent callers for the same normalized key share one call to
    /// `lookup`. A `Some` answer is stored before the in-flight slot is
    /// released; a `None` answer is returned but not stored. Blank names
    /// return `None` without touching the cache.
    pub async fn get_or_resolve<F, Fut>(&self, name: &str, lookup: F) -> CacheLookup
    where
        F: FnOnce(String) -> Fut + Send,
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        let Some(key) = normalize_company_name(name) else {
            return CacheLookup {
                customer_id: None,
                source: ResolutionSource::None,
                coalesced: false,
            };
        };

        if let Some(hit) = self.hit(&key) {
            return hit;
        }

        let (pending, coalesced) = {
            let mut in_flight = self.inner.in_flight.lock().await;

            // A lookup may have settled between the first check and the lock.
            if let Some(hit) = self.hit(&key) {
                return hit;
            }

            match in_flight.get(&key) {
                Some(existing) => {
                    self.inner.coalesced.fetch_add(1, Ordering::Relaxed);
                    debug!("Joining in-flight lookup for key: {}", key);
                    (existing.clone(), true)
                }
                None => {
                    self.inner.misses.fetch_add(1, Ordering::Relaxed);
                    debug!("Cache miss for key: {}", key);

                    let pending = Self::settle_into_cache(
                        Arc::clone(&self.inner),
                        key.clone(),
                        lookup(name.trim().to_string()),
                    );
                    in_flight.insert(key, pending.clone());
                    (pending, false)
                }
            }
        };

        CacheLookup {
            customer_id: pending.await,
            source: ResolutionSource::Api,
            coalesced,
        }
    }

    fn hit(&self, key: &str) -> Option<CacheLookup> {
        let entry = self.inner.entries.get(key)?;
        self.inner.hits.fetch_add(1, Ordering::Relaxed);
        debug!("Cache hit for key: {}", key);
        Some(CacheLookup {
            customer_id: Some(entry.customer_id.clone()),
            source: ResolutionSource::Cache,
            coalesced: false,
        })
    }

    /// Wrap a lookup so that whichever waiter drives it to completion also
    /// records the answer and frees the in-flight slot.
    fn settle_into_cache<Fut>(inner: Arc<CacheInner>, key: String, lookup: Fut) -> InFlightLookup
    where
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        async move {
            let answer = lookup.await;

            let mut in_flight = inner.in_flight.lock().await;
            if let Some(customer_id) = &answer {
                inner
                    .entries
                    .insert(key.clone(), CacheEntry::new(key.clone(), customer_id.clone()));
                debug!("Cached customer {} for key: {}", customer_id, key);
            }
            in_flight.remove(&key);

            answer
        }
        .boxed()
        .shared()
    }

    pub fn size(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Number of lookups currently awaiting an answer
    pub async fn in_flight_count(&self) -> usize {
        self.inner.in_flight.lock().await.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            coalesced: self.inner.coalesced.load(Ordering::Relaxed),
            entries_count: self.inner.entries.len(),
        }
    }

    /// Clear all cached entries and counters. Lookups already in flight
    /// still complete and may repopulate their key.
    pub async fn clear(&self) {
        let _guard = self.inner.in_flight.lock().await;
        self.inner.entries.clear();
        self.inner.hits.store(0, Ordering::Relaxed);
        self.inner.misses.store(0, Ordering::Relaxed);
        self.inner.coalesced.store(0, Ordering::Relaxed);
        info!("Resolution cache cleared");
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("entries", &self.inner.entries.len())
            .finish()
    }
}
