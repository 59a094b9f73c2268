//! Read-through schema cache with background refresh
//!
//! Serves schema lookups from an in-memory snapshot that a background task
//! re-fetches on a fixed delay, so steady-state lookups never block on I/O.
//! A lookup miss triggers one on-demand refresh before giving up: a schema
//! registered after the last refresh is still found, at the cost of one
//! fetch for the caller that missed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::defaults;
use crate::registry::client::RegistryClient;
use crate::registry::snapshot::{SchemaSnapshot, SchemaStore};
use crate::registry::source::SchemaSource;
use crate::schema::Schema;

/// Read-through, self-refreshing schema cache
///
/// One instance per registrar endpoint; independent instances do not
/// interfere. Lookups never surface registry failures: a failed refresh
/// keeps the previous snapshot current, and a name the cache cannot
/// resolve is a plain `None` whether the name is unknown or the registrar
/// is unreachable.
pub struct SchemaCache {
    inner: Arc<CacheInner>,
    /// Background refresh task, aborted on close
    refresher: Mutex<Option<JoinHandle<()>>>,
}

/// State shared between the cache handle and the background task
struct CacheInner {
    source: Arc<dyn SchemaSource>,
    store: SchemaStore,
    closed: AtomicBool,
}

impl SchemaCache {
    /// Create a cache for the registrar at `host:port`, refreshing at the
    /// default interval
    ///
    /// Must be called inside a tokio runtime: the constructor spawns the
    /// background refresh task.
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_interval(host, port, defaults::DEFAULT_REFRESH_INTERVAL)
    }

    /// Create a cache with a custom refresh interval
    pub fn with_interval(host: &str, port: u16, refresh_interval: Duration) -> Self {
        Self::with_source(Arc::new(RegistryClient::new(host, port)), refresh_interval)
    }

    /// Create a cache on top of an arbitrary schema source
    pub fn with_source(source: Arc<dyn SchemaSource>, refresh_interval: Duration) -> Self {
        let inner = Arc::new(CacheInner {
            source,
            store: SchemaStore::new(),
            closed: AtomicBool::new(false),
        });

        // Fixed delay: the sleep starts only once a refresh has finished,
        // so two scheduled refreshes can never overlap. The first refresh
        // runs at once to warm the cache.
        let task_inner = Arc::clone(&inner);
        let refresher = tokio::spawn(async move {
            loop {
                task_inner.refresh().await;
                tokio::time::sleep(refresh_interval).await;
            }
        });

        Self {
            inner,
            refresher: Mutex::new(Some(refresher)),
        }
    }

    /// Look up a schema by name
    ///
    /// Served from the current snapshot when possible, without touching the
    /// network. On a miss, one refresh is awaited and the snapshot
    /// re-checked; a name that is still absent resolves to `None`.
    pub async fn get(&self, name: &str) -> Option<Schema> {
        if let Some(schema) = self.inner.store.current().get(name) {
            return Some(schema.clone());
        }

        self.inner.refresh().await;
        self.inner.store.current().get(name).cloned()
    }

    /// All schemas in the current snapshot, in name order
    ///
    /// Never triggers a refresh.
    pub fn get_all(&self) -> Vec<Schema> {
        self.inner.store.current().schemas().cloned().collect()
    }

    /// Fetch the registry now and publish the result
    ///
    /// Best effort: failures are logged and the previous snapshot stays
    /// current. Safe to call concurrently with the background task and
    /// other callers; each successful fetch publishes independently and
    /// the last publish wins.
    pub async fn refresh_now(&self) {
        self.inner.refresh().await;
    }

    /// Whether [`SchemaCache::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Stop the background refresh task
    ///
    /// No scheduled refresh fires after this returns. The cache stays
    /// readable: hits keep serving the last snapshot, and misses resolve
    /// to `None` without touching the network. Extra calls are no-ops.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);

        let handle = self
            .refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

impl Drop for SchemaCache {
    fn drop(&mut self) {
        self.close();
    }
}

impl CacheInner {
    /// One refresh cycle: fetch the full schema set, publish on success
    async fn refresh(&self) {
        if self.closed.load(Ordering::SeqCst) {
            return;
        }

        match self.source.fetch_all().await {
            Ok(schemas) => {
                let snapshot = SchemaSnapshot::from_schemas(schemas);
                tracing::debug!("Publishing refreshed snapshot ({} schemas)", snapshot.len());
                self.store.replace(snapshot);
            }
            Err(e) => {
                // Registrar down or confused: keep the old snapshot around.
                tracing::warn!("Unable to refresh schema cache: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use async_trait::async_trait;

    struct EmptySource;

    #[async_trait]
    impl SchemaSource for EmptySource {
        async fn fetch_all(&self) -> Result<Vec<Schema>, RegistryError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let cache = SchemaCache::with_source(Arc::new(EmptySource), Duration::from_secs(90));
        assert!(!cache.is_closed());

        cache.close();
        cache.close();
        assert!(cache.is_closed());
    }

    #[tokio::test]
    async fn lookups_after_close_resolve_without_refreshing() {
        let cache = SchemaCache::with_source(Arc::new(EmptySource), Duration::from_secs(90));
        cache.close();

        assert!(cache.get("Anything").await.is_none());
        assert!(cache.get_all().is_empty());
    }
}
