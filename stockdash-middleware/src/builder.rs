//! Builder for composing connectors with middleware layers.
//!
//! Middleware layers form an "onion" around the raw connector. The `layers`
//! vector stores middleware in **outermost-first** order (last added =
//! outermost) and `build()` applies them in reverse to construct the nesting:
//!
//! ```text
//! builder.with_cache(..).layer(custom)
//!
//! Storage: [Custom, Cache]  (outermost first)
//! Applied:  Raw -> Cache -> Custom
//! Result:   Custom(Cache(Raw))
//! ```

use std::sync::Arc;

use stockdash_core::{CacheConfig, MarketDataConnector, Middleware};

use crate::cache::{CacheMiddleware, CachingConnector};

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn MarketDataConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn MarketDataConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the TTL cache.
    ///
    /// The cache sits at the outermost position so hits never reach inner layers.
    /// If a cache layer already exists, it is removed and replaced.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers
            .retain(|m| m.name() != CachingConnector::MIDDLEWARE_NAME);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers
            .retain(|m| m.name() != CachingConnector::MIDDLEWARE_NAME);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Names and configuration of the captured layers, outermost first, with
    /// the raw connector appended as the innermost entry.
    #[must_use]
    pub fn describe(&self) -> Vec<(&'static str, serde_json::Value)> {
        self.layers
            .iter()
            .map(|l| (l.name(), l.config_json()))
            .chain(std::iter::once((
                "RawConnector",
                serde_json::json!({ "name": self.raw.name() }),
            )))
            .collect()
    }

    /// Build the wrapped connector according to the captured layers.
    #[must_use]
    pub fn build(self) -> Arc<dyn MarketDataConnector> {
        let mut acc: Arc<dyn MarketDataConnector> = Arc::clone(&self.raw);
        // innermost first
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
