use std::sync::Arc;
use std::time::Duration;

use stockdash_core::connector::MarketDataConnector;
use stockdash_core::{CacheConfig, Capability, DashboardConfig, DashboardError, FetchMode, Ticker};
use stockdash_middleware::ConnectorBuilder;
use tokio::time::Instant;

/// Orchestrator that routes dashboard requests across registered connectors.
pub struct Dashboard {
    pub(crate) connectors: Vec<Arc<dyn MarketDataConnector>>,
    pub(crate) cfg: DashboardConfig,
}

/// Builder for constructing a `Dashboard` with custom configuration.
pub struct DashboardBuilder {
    connectors: Vec<Arc<dyn MarketDataConnector>>,
    cfg: DashboardConfig,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via [`Self::with_connector`]
    ///   or [`Self::with_cached_connector`].
    /// - Defaults: 10s provider timeout, no batch deadline, concurrent fetches.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: DashboardConfig::default(),
        }
    }

    /// Register a provider connector as-is.
    ///
    /// Behavior and trade-offs:
    /// - Connectors are consulted in registration order; the first one that
    ///   answers with data wins and later ones are only tried on failure.
    /// - Nothing is cached unless the connector already carries a cache layer.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MarketDataConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Register a provider connector wrapped in the TTL cache middleware.
    ///
    /// Equivalent to `with_connector(ConnectorBuilder::new(raw).with_cache(cfg).build())`.
    /// The provider timeout is applied outside the cache, so a timed-out call is
    /// never stored.
    #[must_use]
    pub fn with_cached_connector(
        self,
        raw: Arc<dyn MarketDataConnector>,
        cfg: &CacheConfig,
    ) -> Self {
        let wrapped = ConnectorBuilder::new(raw).with_cache(cfg).build();
        self.with_connector(wrapped)
    }

    /// Set the per-provider request timeout.
    ///
    /// A call that exceeds it fails with `ProviderTimeout` and counts as a
    /// failure for that ticker only.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for batch downloads.
    ///
    /// Tickers still pending when it passes fail with `RequestTimeout` for
    /// `download:history`; tickers that already answered are kept.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Choose between concurrent and sequential per-ticker fetches.
    #[must_use]
    pub const fn fetch_mode(mut self, mode: FetchMode) -> Self {
        self.cfg.fetch_mode = mode;
        self
    }

    /// Pause between consecutive fetches in `FetchMode::Sequential`.
    ///
    /// Ignored in concurrent mode.
    #[must_use]
    pub const fn request_spacing(mut self, spacing: Duration) -> Self {
        self.cfg.request_spacing = spacing;
        self
    }

    /// Replace the whole configuration at once (e.g. one loaded with serde).
    #[must_use]
    pub fn config(mut self, cfg: DashboardConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Dashboard`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered.
    pub fn build(self) -> Result<Dashboard, DashboardError> {
        if self.connectors.is_empty() {
            return Err(DashboardError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        Ok(Dashboard {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attribute an untagged error to the connector that produced it.
pub(crate) fn tag_err(connector: &str, e: DashboardError) -> DashboardError {
    match e {
        e @ (DashboardError::NotFound { .. }
        | DashboardError::ProviderTimeout { .. }
        | DashboardError::Connector { .. }
        | DashboardError::RequestTimeout { .. }
        | DashboardError::AllProvidersFailed(_)) => e,
        other => DashboardError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Run `fut` unless `deadline` passes first.
///
/// Yields `None` when the deadline elapsed before `fut` completed. A deadline
/// that has already passed drops `fut` without polling it.
pub(crate) async fn within_deadline<Fut>(
    deadline: Option<Instant>,
    fut: Fut,
) -> Option<Fut::Output>
where
    Fut: core::future::Future,
{
    match deadline {
        Some(at) if Instant::now() >= at => None,
        Some(at) => tokio::time::timeout_at(at, fut).await.ok(),
        None => Some(fut.await),
    }
}

impl Dashboard {
    /// Start building a new `Dashboard`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use stockdash::{CacheConfig, Dashboard};
    /// use stockdash_yahoo::YahooConnector;
    ///
    /// let yahoo = Arc::new(YahooConnector::new_default()?);
    /// let dash = Dashboard::builder()
    ///     .with_cached_connector(yahoo, &CacheConfig::default())
    ///     .provider_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "stockdash::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, DashboardError>
    where
        Fut: core::future::Future<Output = Result<T, DashboardError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(DashboardError::provider_timeout(connector_name, capability)))
    }

    /// Priority-with-fallback fetch for a single ticker.
    ///
    /// - Connectors are tried in registration order; the first success wins.
    /// - Each call is bounded by `provider_timeout`.
    /// - Connectors that return `None` from `call` lack the capability and are skipped.
    /// - Failures are collapsed by [`crate::collapse_errors`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "stockdash::core::fetch_single",
            skip(self, call),
            fields(ticker = %ticker, capability = %capability, not_found = %not_found_label),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        ticker: &Ticker,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, DashboardError>
    where
        T: Send,
        F: Fn(Arc<dyn MarketDataConnector>, Ticker) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, DashboardError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<DashboardError> = Vec::new();

        for c in &self.connectors {
            let Some(fut) = call(Arc::clone(c), ticker.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability.as_str(),
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }

        Err(crate::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} for {ticker}")),
        ))
    }
}
