//! stockdash
//!
//! The data side of a stock dashboard: fetch daily history for a handful of
//! tickers, line the series up on a shared calendar, and derive the headline
//! and performance figures a UI shows next to its charts.
//!
//! Overview
//! - Register one or more connectors (e.g. `stockdash-yahoo`); wrap them in the
//!   TTL cache with [`DashboardBuilder::with_cached_connector`].
//! - [`Dashboard::fetch`] returns one ticker's series; failures are tagged with
//!   the connector that produced them.
//! - [`Dashboard::download`] fetches many tickers, isolating each failure.
//! - [`Dashboard::snapshot`] runs the whole pass for a [`Selection`] and returns
//!   a [`DashboardSnapshot`]: the aligned table, current metrics, performance
//!   summary, raw series for candlesticks, and per-ticker failures.
//! - [`Dashboard::company_info`] serves the detail panel independently.
//!
//! Quickstart:
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockdash::{CacheConfig, Dashboard, Selection};
//! use stockdash_yahoo::YahooConnector;
//!
//! let yahoo = Arc::new(YahooConnector::new_default()?);
//! let dash = Dashboard::builder()
//!     .with_cached_connector(yahoo, &CacheConfig::default())
//!     .build()?;
//!
//! let today = chrono::Utc::now().date_naive();
//! let snap = dash.snapshot(&Selection::default_for(today)).await?;
//! for p in &snap.performance {
//!     println!("{}: {:?}", p.ticker, p.change_pct);
//! }
//! ```
//!
//! A selection in which every ticker fails returns `NoDataAvailable`; any other
//! outcome is a snapshot, possibly with entries in `failures`.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Dashboard, DashboardBuilder};
pub use router::download::DownloadBuilder;
pub use router::snapshot::{DashboardSnapshot, Selection};
pub use router::util::{collapse_errors, join_with_deadline};

pub use stockdash_middleware::{CacheMiddleware, CachingConnector, ConnectorBuilder};

// Re-export core types for convenience
pub use stockdash_core::{
    AlignedRow, AlignedTable, Bar, CacheConfig, Capability, ChartKind, CompanyInfo,
    CurrentMetric, DEFAULT_CACHE_TTL_MS, DEFAULT_LOOKBACK_DAYS, DEFAULT_TICKERS,
    DEFAULT_UNIVERSE, DashboardConfig, DashboardError, DateRange, DownloadReport, FetchMode,
    InfoLookup, MarketDataConnector, Middleware, OhlcvRecord, PerformanceSummary, PriceField,
    Ticker, TickerFailure, TimeSeries, align, current_metrics, pct_change, performance_summary,
};

/// Connector traits, for implementing custom providers.
pub use stockdash_core::connector;
