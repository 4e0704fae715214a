//! Stockdash-specific error taxonomy, configuration primitives, and selection enums.
#![warn(missing_docs)]

mod capability;
mod config;
mod error;
mod selection;

pub use capability::Capability;
pub use config::{CacheConfig, DEFAULT_CACHE_TTL_MS, DashboardConfig, FetchMode};
pub use error::DashboardError;
pub use selection::{
    ChartKind, DEFAULT_LOOKBACK_DAYS, DEFAULT_TICKERS, DEFAULT_UNIVERSE, PriceField,
};
