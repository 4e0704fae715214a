//! Configuration types shared across the orchestrator, middleware, and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a batch of per-ticker fetches is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchMode {
    /// Issue every ticker's fetch at once and wait for all of them.
    #[default]
    Concurrent,
    /// Fetch tickers one after another in selection order, pausing for
    /// `DashboardConfig::request_spacing` between provider calls.
    Sequential,
}

/// Global configuration for the `Dashboard` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Timeout for individual provider requests. A timed-out fetch is a
    /// per-ticker failure like any other.
    pub provider_timeout: Duration,
    /// Optional overall deadline for a batch download.
    pub request_timeout: Option<Duration>,
    /// Strategy for issuing per-ticker fetches.
    pub fetch_mode: FetchMode,
    /// Pause inserted between consecutive provider calls in sequential mode.
    pub request_spacing: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            fetch_mode: FetchMode::default(),
            request_spacing: Duration::ZERO,
        }
    }
}

/// Default lifetime of a cached provider answer: one hour.
pub const DEFAULT_CACHE_TTL_MS: u64 = 3_600_000;

/// Configuration for the TTL cache middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of successful results in milliseconds. `0` disables positive caching.
    pub ttl_ms: u64,
    /// Lifetime of failed results in milliseconds. `0` disables negative caching.
    /// Transient failures (timeouts) are never stored.
    pub negative_ttl_ms: u64,
    /// Upper bound on stored entries per capability.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_CACHE_TTL_MS,
            negative_ttl_ms: DEFAULT_CACHE_TTL_MS,
            max_entries: 1024,
        }
    }
}

impl CacheConfig {
    /// Positive TTL as a `Duration`.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// Negative TTL as a `Duration`.
    #[must_use]
    pub const fn negative_ttl(&self) -> Duration {
        Duration::from_millis(self.negative_ttl_ms)
    }
}
