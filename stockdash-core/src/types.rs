//! Re-export of foundational types from `stockdash-types` alongside the domain records.
// Consolidated re-exports so downstream crates can depend on `stockdash-core` only

pub use stockdash_types::{
    CacheConfig, Capability, ChartKind, DEFAULT_CACHE_TTL_MS, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_TICKERS, DEFAULT_UNIVERSE, DashboardConfig, DashboardError, FetchMode, PriceField,
};

pub use crate::domain::{Bar, CompanyInfo, DateRange, OhlcvRecord, Ticker, TimeSeries};
pub use crate::reports::{DownloadReport, InfoLookup, TickerFailure};
