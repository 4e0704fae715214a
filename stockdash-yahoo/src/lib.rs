//! stockdash-yahoo
//!
//! Public connector that implements `MarketDataConnector` on top of the
//! `yfinance-rs` client: daily OHLCV history from the chart service and
//! company details from the profile endpoint plus a trailing year of candles.
#![warn(missing_docs)]

/// Adapter definitions and the production `yfinance-rs` adapter.
pub mod adapter;
mod convert;

use std::sync::Arc;

use adapter::{RealAdapter, YahooHistory, YahooProfile};
use async_trait::async_trait;
use stockdash_core::connector::{HistoryProvider, InfoProvider, MarketDataConnector};
use stockdash_core::{CompanyInfo, DashboardError, DateRange, Ticker, TimeSeries};

/// Name reported in logs and connector-tagged errors.
pub const CONNECTOR_NAME: &str = "stockdash-yahoo";

#[cfg(feature = "test-adapters")]
type HistoryAdapter = Arc<dyn YahooHistory>;
#[cfg(not(feature = "test-adapters"))]
type HistoryAdapter = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type ProfileAdapter = Arc<dyn YahooProfile>;
#[cfg(not(feature = "test-adapters"))]
type ProfileAdapter = Arc<RealAdapter>;

/// Public connector type. Production users construct it with
/// [`YahooConnector::new_default`] or [`YahooConnector::builder`].
pub struct YahooConnector {
    history: HistoryAdapter,
    profile: ProfileAdapter,
}

/// Builder for a [`YahooConnector`] with a custom HTTP client or user agent.
#[derive(Default)]
pub struct YahooConnectorBuilder {
    http: Option<reqwest::Client>,
    user_agent: Option<String>,
}

impl YahooConnectorBuilder {
    /// Use an existing client. It should enable a cookie store for the crumb handshake.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Override the user agent sent by the underlying `YfClient`.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client or the `YfClient` cannot be constructed.
    pub fn build(self) -> Result<YahooConnector, DashboardError> {
        let http = match self.http {
            Some(h) => h,
            None => adapter::default_http()?,
        };
        let real = RealAdapter::with_http(
            http,
            self.user_agent
                .as_deref()
                .unwrap_or(adapter::DEFAULT_USER_AGENT),
        )?;
        Ok(YahooConnector::from_real(real))
    }
}

impl YahooConnector {
    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("delisted")
    }

    fn normalize_error(e: DashboardError, what: &str) -> DashboardError {
        match e {
            DashboardError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    DashboardError::not_found(what.to_string())
                } else {
                    DashboardError::connector(CONNECTOR_NAME, msg)
                }
            }
            other => other,
        }
    }

    /// Build with a fresh cookie-enabled HTTP client and the default user agent.
    ///
    /// # Errors
    /// Returns `Connector` if the HTTP client or the `YfClient` cannot be constructed.
    pub fn new_default() -> Result<Self, DashboardError> {
        Self::builder().build()
    }

    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        YahooConnectorBuilder::default()
    }

    /// Build from an existing `yfinance_rs::YfClient`.
    #[must_use]
    pub fn new_with_client(client: yfinance_rs::YfClient) -> Self {
        Self::from_real(RealAdapter::new(client))
    }

    fn from_real(real: RealAdapter) -> Self {
        let shared = Arc::new(real);
        Self {
            history: Arc::clone(&shared) as HistoryAdapter,
            profile: shared as ProfileAdapter,
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    pub fn from_adapters(history: Arc<dyn YahooHistory>, profile: Arc<dyn YahooProfile>) -> Self {
        Self { history, profile }
    }
}

impl MarketDataConnector for YahooConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }
}

#[async_trait]
impl HistoryProvider for YahooConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "stockdash_yahoo::history", skip(self), fields(ticker = %ticker, range = %range))
    )]
    async fn history(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<TimeSeries, DashboardError> {
        let what = format!("history for {ticker}");
        let resp = self
            .history
            .fetch_full(ticker.as_str(), convert::history_request(range))
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        let rows = convert::daily_rows(&resp, range);
        #[cfg(feature = "tracing")]
        tracing::debug!(candles = resp.candles.len(), rows = rows.len(), "history mapped");
        Ok(TimeSeries::from_records(ticker.clone(), rows))
    }
}

#[async_trait]
impl InfoProvider for YahooConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "stockdash_yahoo::company_info", skip(self), fields(ticker = %ticker))
    )]
    async fn company_info(&self, ticker: &Ticker) -> Result<CompanyInfo, DashboardError> {
        let what = format!("company info for {ticker}");
        let today = chrono::Utc::now().date_naive();
        let (profile, year) = tokio::join!(
            self.profile.load(ticker.as_str()),
            self.history
                .fetch_full(ticker.as_str(), convert::trailing_year_request(today)),
        );
        let profile = profile.map_err(|e| Self::normalize_error(e, &what))?;
        // the market figures are optional; a failed history only blanks them
        let year = match year {
            Ok(resp) => Some(resp),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "trailing year unavailable");
                None
            }
        };
        Ok(convert::company_info(&profile, year.as_ref()))
    }
}
