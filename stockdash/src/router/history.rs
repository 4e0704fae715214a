use chrono::NaiveDate;
use stockdash_core::{Capability, DashboardError, DateRange, Ticker, TimeSeries};

use crate::Dashboard;

impl Dashboard {
    /// Fetch daily history for one ticker over an inclusive date range.
    ///
    /// Behavior:
    /// - Connectors are tried in registration order; the first non-empty series wins.
    /// - Each provider call is bounded by the configured provider timeout.
    /// - An empty series counts as a failure (`NotFound("history for TICKER")`),
    ///   so a later connector still gets a chance to answer.
    ///
    /// # Errors
    /// Returns the collapsed provider failure; see [`crate::collapse_errors`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "stockdash::history",
            skip(self),
            fields(ticker = %ticker, range = %range),
        )
    )]
    pub async fn fetch(
        &self,
        ticker: &Ticker,
        range: DateRange,
    ) -> Result<TimeSeries, DashboardError> {
        self.fetch_single(ticker, Capability::History, "history", move |c, t| {
            c.as_history_provider()?;
            Some(async move {
                let Some(hp) = c.as_history_provider() else {
                    return Err(DashboardError::unsupported(Capability::History.as_str()));
                };
                let series = hp.history(&t, range).await?;
                if series.is_empty() {
                    return Err(DashboardError::not_found(format!("history for {t}")));
                }
                Ok(series)
            })
        })
        .await
    }

    /// Fetch history from unvalidated input.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty ticker and `InvalidRange` when
    /// `start > end`, both before any connector is consulted; otherwise
    /// behaves like [`Dashboard::fetch`].
    pub async fn fetch_between(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, DashboardError> {
        let ticker = Ticker::new(ticker)?;
        let range = DateRange::new(start, end)?;
        self.fetch(&ticker, range).await
    }
}
