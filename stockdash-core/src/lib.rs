//! stockdash-core
//!
//! Core types, traits, and the aggregation pipeline shared across the stockdash crates.
//!
//! - `types`: domain records (tickers, ranges, OHLCV series, company info) and report envelopes.
//! - `connector`: the `MarketDataConnector` trait and capability provider traits.
//! - `pipeline`: date alignment of several series plus the derived headline and
//!   performance metrics.
//!
//! The pipeline is pure: it never performs I/O, never panics on missing data,
//! and never substitutes zero for a missing value.
#![warn(missing_docs)]

/// Connector capability traits and the primary `MarketDataConnector` interface.
pub mod connector;
/// Domain records handed out by connectors.
pub mod domain;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Alignment and metric computation over per-ticker series.
pub mod pipeline;
/// Report envelopes produced by the orchestrator.
pub mod reports;
pub mod types;

pub use connector::MarketDataConnector;
pub use middleware::Middleware;
pub use pipeline::align::{AlignedRow, AlignedTable, align};
pub use pipeline::metrics::{
    CurrentMetric, PerformanceSummary, current_metrics, pct_change, performance_summary,
};
pub use types::*;
