use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stockdash_core::connector::{HistoryProvider, InfoProvider, MarketDataConnector};
use stockdash_core::{CompanyInfo, DashboardError, DateRange, Ticker, TimeSeries};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(DashboardError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<Ticker, MockBehavior<TimeSeries>>,
    info_rules: HashMap<Ticker, MockBehavior<CompanyInfo>>,
    history_requests: Vec<(Ticker, DateRange)>,
    info_requests: Vec<Ticker>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for a specific ticker.
    pub async fn set_history_behavior(&self, ticker: Ticker, behavior: MockBehavior<TimeSeries>) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(ticker, behavior);
    }

    /// Set the behavior for `company_info` calls for a specific ticker.
    pub async fn set_info_behavior(&self, ticker: Ticker, behavior: MockBehavior<CompanyInfo>) {
        let mut guard = self.state.lock().await;
        guard.info_rules.insert(ticker, behavior);
    }

    /// Every `history` request received so far, in arrival order.
    pub async fn history_requests(&self) -> Vec<(Ticker, DateRange)> {
        self.state.lock().await.history_requests.clone()
    }

    /// Number of `history` requests received for `ticker`.
    pub async fn history_calls(&self, ticker: &Ticker) -> usize {
        let guard = self.state.lock().await;
        guard
            .history_requests
            .iter()
            .filter(|(t, _)| t == ticker)
            .count()
    }

    /// Number of `company_info` requests received for `ticker`.
    pub async fn info_calls(&self, ticker: &Ticker) -> usize {
        let guard = self.state.lock().await;
        guard.info_requests.iter().filter(|t| *t == ticker).count()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.info_rules.clear();
        guard.history_requests.clear();
        guard.info_requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Tickers without a configured behavior answer `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn MarketDataConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn MarketDataConnector>, controller)
    }

    async fn resolve<T>(
        behavior: Option<MockBehavior<T>>,
        what: String,
    ) -> Result<T, DashboardError> {
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(DashboardError::not_found(what)),
        }
    }
}

impl MarketDataConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<TimeSeries, DashboardError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.history_requests.push((ticker.clone(), range));
            guard.history_rules.get(ticker).cloned()
        };
        Self::resolve(behavior, format!("history for {ticker}")).await
    }
}

#[async_trait]
impl InfoProvider for DynamicMockConnector {
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, DashboardError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.info_requests.push(ticker.clone());
            guard.info_rules.get(ticker).cloned()
        };
        Self::resolve(behavior, format!("company info for {ticker}")).await
    }
}
