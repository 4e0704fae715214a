use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use stockdash_core::connector::{HistoryProvider, InfoProvider};
use stockdash_core::{
    CacheConfig, Capability, CompanyInfo, DashboardError, DateRange, MarketDataConnector, Ticker,
    TimeSeries,
};

/// One cache slot per distinct `(ticker, start, end)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HistoryKey {
    ticker: Ticker,
    range: DateRange,
}

#[async_trait]
trait CacheStore<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Option<V>;
    async fn put(&self, key: K, value: V);
}

/// Bounded store whose entries expire a fixed time after insertion.
struct TtlStore<K, V> {
    inner: moka::future::Cache<K, V>,
}

impl<K, V> TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: moka::future::Cache::builder()
                .max_capacity(capacity.max(1))
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for TtlStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }
    async fn put(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }
}

/// Positive and negative store for one capability; `None` means disabled (TTL = 0).
struct Stores<K, V> {
    ok: Option<Arc<dyn CacheStore<K, Arc<V>>>>,
    err: Option<Arc<dyn CacheStore<K, DashboardError>>>,
}

impl<K, V> Stores<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn new(cfg: &CacheConfig) -> Self {
        let ok = (cfg.ttl_ms > 0).then(|| {
            let store: Arc<dyn CacheStore<K, Arc<V>>> =
                Arc::new(TtlStore::new(cfg.max_entries, cfg.ttl()));
            store
        });
        let err = (cfg.negative_ttl_ms > 0).then(|| {
            let store: Arc<dyn CacheStore<K, DashboardError>> =
                Arc::new(TtlStore::new(cfg.max_entries, cfg.negative_ttl()));
            store
        });
        Self { ok, err }
    }

    async fn lookup(&self, key: &K) -> Option<Result<V, DashboardError>> {
        if let Some(store) = &self.ok
            && let Some(v) = store.get(key).await
        {
            return Some(Ok((*v).clone()));
        }
        if let Some(store) = &self.err
            && let Some(e) = store.get(key).await
        {
            return Some(Err(e));
        }
        None
    }

    async fn record(&self, key: K, result: &Result<V, DashboardError>) {
        match result {
            Ok(v) => {
                if let Some(store) = &self.ok {
                    store.put(key, Arc::new(v.clone())).await;
                }
            }
            // the next lookup after a timeout may well succeed
            Err(e) if e.is_transient() => {}
            Err(e) => {
                if let Some(store) = &self.err {
                    store.put(key, e.clone()).await;
                }
            }
        }
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Create a caching middleware from its configuration.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl stockdash_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn MarketDataConnector>) -> Arc<dyn MarketDataConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        CachingConnector::MIDDLEWARE_NAME
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": self.cfg.ttl_ms,
            "negative_ttl_ms": self.cfg.negative_ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

/// Connector wrapper that memoizes history and company-info answers.
///
/// Successful answers live for `ttl_ms`; permanent failures (unknown symbol,
/// provider error, empty result) live for `negative_ttl_ms` so a bad ticker is
/// not re-requested on every interaction. Concurrent misses on the same key may
/// each reach the inner connector; the last writer wins.
pub struct CachingConnector {
    inner: Arc<dyn MarketDataConnector>,
    history: Stores<HistoryKey, TimeSeries>,
    info: Stores<Ticker, CompanyInfo>,
}

impl CachingConnector {
    pub(crate) const MIDDLEWARE_NAME: &'static str = "CachingMiddleware";

    /// Wrap `inner` with caches sized and timed by `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn MarketDataConnector>, cfg: &CacheConfig) -> Self {
        Self {
            inner,
            history: Stores::new(cfg),
            info: Stores::new(cfg),
        }
    }
}

impl MarketDataConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        self.inner.as_history_provider()?;
        Some(self as &dyn HistoryProvider)
    }

    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        self.inner.as_info_provider()?;
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistoryProvider for CachingConnector {
    async fn history(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<TimeSeries, DashboardError> {
        let key = HistoryKey {
            ticker: ticker.clone(),
            range,
        };
        if let Some(hit) = self.history.lookup(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker = %ticker, range = %range, ok = hit.is_ok(), "history cache hit");
            return hit;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(ticker = %ticker, range = %range, "history cache miss");
        let result = self
            .inner
            .as_history_provider()
            .ok_or_else(|| DashboardError::unsupported(Capability::History.to_string()))?
            .history(ticker, range)
            .await;
        self.history.record(key, &result).await;
        result
    }
}

#[async_trait]
impl InfoProvider for CachingConnector {
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, DashboardError> {
        if let Some(hit) = self.info.lookup(ticker).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker = %ticker, ok = hit.is_ok(), "company info cache hit");
            return hit;
        }
        let result = self
            .inner
            .as_info_provider()
            .ok_or_else(|| DashboardError::unsupported(Capability::CompanyInfo.to_string()))?
            .company_info(ticker)
            .await;
        self.info.record(ticker.clone(), &result).await;
        result
    }
}
