use async_trait::async_trait;

use crate::DashboardError;
use crate::domain::{CompanyInfo, DateRange, Ticker, TimeSeries};

/// Focused role trait for connectors that provide daily OHLCV history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch daily bars for `ticker` covering `range` (both ends inclusive).
    ///
    /// Connectors report an unknown symbol as `NotFound` and may return an
    /// empty series when the provider has no rows; the orchestrator treats both
    /// as a per-ticker failure.
    async fn history(&self, ticker: &Ticker, range: DateRange)
    -> Result<TimeSeries, DashboardError>;
}

/// Focused role trait for connectors that provide descriptive company information.
#[async_trait]
pub trait InfoProvider: Send + Sync {
    /// Fetch name, classification, valuation and summary fields for `ticker`.
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, DashboardError>;
}

/// Unified connector interface that advertises capabilities via accessors.
///
/// Connectors opt into a capability by returning `Some(self)` from the matching
/// `as_*_provider` method. Middleware wraps a connector and forwards the same
/// capability set.
pub trait MarketDataConnector: Send + Sync {
    /// A stable identifier used in logs and connector-tagged errors (e.g. "stockdash-yahoo").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }

    /// Advertise company-info capability by returning a usable trait object reference when supported.
    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        None
    }
}
