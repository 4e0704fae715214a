use std::sync::Arc;

use chrono::NaiveDate;
use stockdash::connector::MarketDataConnector;
use stockdash::{CacheConfig, Dashboard, DashboardError};

/// Environment variable that switches every demo to the offline mock connector.
pub const USE_MOCK_ENV: &str = "STOCKDASH_DEMOS_USE_MOCK";

/// Whether the demos run against the mock connector.
#[must_use]
pub fn using_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok()
}

/// Return a raw connector for demos: the mock in CI, Yahoo otherwise.
///
/// # Errors
/// Returns an error if the Yahoo HTTP client cannot be constructed.
pub fn get_connector() -> Result<Arc<dyn MarketDataConnector>, DashboardError> {
    if using_mock() {
        println!("--- (Using Mock Connector for CI) ---");
        tracing::info!(connector = stockdash_mock::MockConnector::NAME, "demo connector selected");
        Ok(Arc::new(stockdash_mock::MockConnector::new()))
    } else {
        tracing::info!(connector = stockdash_yahoo::CONNECTOR_NAME, "demo connector selected");
        Ok(Arc::new(stockdash_yahoo::YahooConnector::new_default()?))
    }
}

/// A dashboard over [`get_connector`] with the default one-hour cache.
///
/// # Errors
/// Returns an error if the connector or the dashboard cannot be built.
pub fn get_dashboard() -> Result<Dashboard, DashboardError> {
    Dashboard::builder()
        .with_cached_connector(get_connector()?, &CacheConfig::default())
        .build()
}

/// "Today" for the demos. The mock pins a fixed date so output is reproducible.
#[must_use]
pub fn today() -> NaiveDate {
    if using_mock() {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap_or_default()
    } else {
        chrono::Local::now().date_naive()
    }
}

/// Render an optional percentage the way the dashboard widgets do.
#[must_use]
pub fn fmt_pct(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |p| format!("{p:+.2}%"))
}

/// Render an optional number with two decimals, or "N/A".
#[must_use]
pub fn fmt_num(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |x| format!("{x:.2}"))
}
