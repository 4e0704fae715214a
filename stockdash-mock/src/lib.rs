//! Mock connectors for CI-safe tests and demos.
//!
//! - [`MockConnector`] serves deterministic synthetic history for the default
//!   ticker universe and company information for a handful of them.
//! - [`DynamicMockConnector`] defers every answer to a [`DynamicMockController`]
//!   so tests can script success, failure, and hangs per ticker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use stockdash_core::connector::{HistoryProvider, InfoProvider, MarketDataConnector};
use stockdash_core::{CompanyInfo, DashboardError, DateRange, Ticker, TimeSeries};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector backed by static fixtures.
///
/// Special symbols: `FAIL` returns a connector error, `TIMEOUT` sleeps before
/// answering so orchestrator timeouts can be exercised, and `EMPTY` returns a
/// series without bars.
pub struct MockConnector {
    history_calls: AtomicUsize,
    info_calls: AtomicUsize,
    latency: Duration,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Connector name reported in errors and logs.
    pub const NAME: &'static str = "stockdash-mock";

    /// Create a mock whose `TIMEOUT` symbol stalls for 200 ms.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history_calls: AtomicUsize::new(0),
            info_calls: AtomicUsize::new(0),
            latency: Duration::from_millis(200),
        }
    }

    /// Override how long the `TIMEOUT` symbol sleeps.
    #[must_use]
    pub fn with_timeout_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `history` calls served so far.
    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    /// Number of `company_info` calls served so far.
    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_timeout(
        &self,
        ticker: &Ticker,
        capability: &'static str,
    ) -> Result<(), DashboardError> {
        match ticker.as_str() {
            "FAIL" => Err(DashboardError::connector(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(self.latency).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl MarketDataConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<TimeSeries, DashboardError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(ticker, "history").await?;
        fixtures::history::by_symbol(ticker, range)
            .ok_or_else(|| DashboardError::not_found(format!("history for {ticker}")))
    }
}

#[async_trait]
impl InfoProvider for MockConnector {
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, DashboardError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(ticker, "company-info").await?;
        fixtures::info::by_symbol(ticker.as_str())
            .ok_or_else(|| DashboardError::not_found(format!("company info for {ticker}")))
    }
}
