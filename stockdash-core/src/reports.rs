//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::DashboardError;
use crate::domain::{CompanyInfo, Ticker, TimeSeries};

/// A ticker whose fetch failed, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerFailure {
    /// The ticker that failed.
    pub ticker: Ticker,
    /// Why it failed.
    pub error: DashboardError,
}

impl TickerFailure {
    /// Pair a ticker with its error.
    #[must_use]
    pub const fn new(ticker: Ticker, error: DashboardError) -> Self {
        Self { ticker, error }
    }
}

/// Summary of a batch history download.
///
/// `series` holds every ticker that produced data in selection order;
/// `failures` holds one entry per ticker that did not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DownloadReport {
    /// Successfully fetched series.
    pub series: Vec<TimeSeries>,
    /// Per-ticker failures.
    pub failures: Vec<TickerFailure>,
}

impl DownloadReport {
    /// True when no ticker produced data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Failure recorded for `ticker`, if any.
    #[must_use]
    pub fn failure_for(&self, ticker: &Ticker) -> Option<&DashboardError> {
        self.failures
            .iter()
            .find(|f| &f.ticker == ticker)
            .map(|f| &f.error)
    }
}

/// Result of a company information lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoLookup {
    /// Requested ticker.
    pub ticker: Ticker,
    /// Resolved information.
    pub info: CompanyInfo,
}
