#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use stockdash_core::DashboardError;
use yf::core::HistoryService;
use yfinance_rs as yf;

use crate::CONNECTOR_NAME;

/// Browser-like user agent; Yahoo rejects the default reqwest one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YahooHistory: Send + Sync {
    /// Fetch candles and corporate actions for `symbol`.
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, DashboardError>;
}

/// Profile abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait YahooProfile: Send + Sync {
    /// Load the company or fund profile for `symbol`.
    async fn load(&self, symbol: &str) -> Result<yf::profile::Profile, DashboardError>;
}

/// Real adapter backed by a single `YfClient` instance.
/// `YfClient` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    client: yf::YfClient,
}

impl RealAdapter {
    /// Build a `YfClient` on top of `http` with the given user agent.
    ///
    /// `http` should enable a cookie store; Yahoo's crumb handshake needs it.
    ///
    /// # Errors
    /// Returns `Connector` if the `YfClient` cannot be constructed.
    pub fn with_http(http: reqwest::Client, user_agent: &str) -> Result<Self, DashboardError> {
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DashboardError::connector(CONNECTOR_NAME, e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `YfClient`.
    #[must_use]
    pub const fn new(client: yf::YfClient) -> Self {
        Self { client }
    }
}

/// HTTP client with the cookie store the crumb handshake relies on.
///
/// # Errors
/// Returns `Connector` if the client cannot be constructed.
pub fn default_http() -> Result<reqwest::Client, DashboardError> {
    reqwest::Client::builder()
        .cookie_store(true)
        .no_proxy()
        .build()
        .map_err(|e| DashboardError::connector(CONNECTOR_NAME, e.to_string()))
}

fn map_yf_err(e: &yf::YfError, context: &str) -> DashboardError {
    match e {
        yf::YfError::NotFound { .. } => DashboardError::not_found(context.to_string()),
        yf::YfError::RateLimited { .. } => {
            DashboardError::connector(CONNECTOR_NAME, format!("rate limit: {context}"))
        }
        yf::YfError::ServerError { status, .. } => DashboardError::connector(
            CONNECTOR_NAME,
            format!("server error {status}: {context}"),
        ),
        yf::YfError::Status { status, .. } => {
            DashboardError::connector(CONNECTOR_NAME, format!("status {status}: {context}"))
        }
        other => DashboardError::connector(CONNECTOR_NAME, other.to_string()),
    }
}

#[async_trait]
impl YahooHistory for RealAdapter {
    async fn fetch_full(
        &self,
        symbol: &str,
        req: yf::core::services::HistoryRequest,
    ) -> Result<yf::HistoryResponse, DashboardError> {
        self.client
            .fetch_full_history(symbol, req)
            .await
            .map_err(|e| map_yf_err(&e, &format!("history for {symbol}")))
    }
}

#[async_trait]
impl YahooProfile for RealAdapter {
    async fn load(&self, symbol: &str) -> Result<yf::profile::Profile, DashboardError> {
        yf::profile::load_profile(&self.client, symbol)
            .await
            .map_err(|e| map_yf_err(&e, &format!("company info for {symbol}")))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn YahooHistory {
    /// Build a `YahooHistory` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(
                String,
                yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, DashboardError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> YahooHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    yf::core::services::HistoryRequest,
                ) -> Result<yf::HistoryResponse, DashboardError>,
        {
            async fn fetch_full(
                &self,
                symbol: &str,
                req: yf::core::services::HistoryRequest,
            ) -> Result<yf::HistoryResponse, DashboardError> {
                (self.0)(symbol.to_string(), req)
            }
        }
        Arc::new(FnHist(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn YahooProfile {
    /// Build a `YahooProfile` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn YahooProfile>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<yf::profile::Profile, DashboardError>,
    {
        struct FnProfile<F>(F);
        #[async_trait]
        impl<F> YahooProfile for FnProfile<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<yf::profile::Profile, DashboardError>,
        {
            async fn load(&self, symbol: &str) -> Result<yf::profile::Profile, DashboardError> {
                (self.0)(symbol.to_string())
            }
        }
        Arc::new(FnProfile(f))
    }
}
