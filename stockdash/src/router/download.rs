use std::collections::HashSet;

use stockdash_core::{
    Capability, DashboardError, DateRange, DownloadReport, FetchMode, Ticker, TickerFailure,
    TimeSeries,
};

use crate::Dashboard;

/// Builder to orchestrate history downloads for several tickers at once.
pub struct DownloadBuilder<'a> {
    pub(crate) dashboard: &'a Dashboard,
    pub(crate) tickers: Vec<Ticker>,
    pub(crate) range: Option<DateRange>,
}

impl<'a> DownloadBuilder<'a> {
    /// Create a new builder bound to a `Dashboard` instance.
    ///
    /// Starts with an empty ticker list and no range; both must be supplied
    /// before `run()`.
    #[must_use]
    pub const fn new(dashboard: &'a Dashboard) -> Self {
        Self {
            dashboard,
            tickers: Vec::new(),
            range: None,
        }
    }

    /// Replace the ticker list.
    ///
    /// Order is preserved and is the order of the resulting report.
    ///
    /// # Errors
    /// Returns an error if the same ticker appears twice.
    pub fn tickers(mut self, tickers: &[Ticker]) -> Result<Self, DashboardError> {
        let mut seen = HashSet::new();
        for t in tickers {
            if !seen.insert(t) {
                return Err(DashboardError::InvalidArg(format!(
                    "duplicate ticker '{t}' in ticker list"
                )));
            }
        }

        self.tickers = tickers.to_vec();
        Ok(self)
    }

    /// Append one ticker.
    ///
    /// # Errors
    /// Returns an error if the ticker is already in the list.
    pub fn add_ticker(mut self, ticker: Ticker) -> Result<Self, DashboardError> {
        if self.tickers.contains(&ticker) {
            return Err(DashboardError::InvalidArg(format!(
                "duplicate ticker '{ticker}' already exists in ticker list"
            )));
        }

        self.tickers.push(ticker);
        Ok(self)
    }

    /// Set the inclusive date range shared by every ticker.
    #[must_use]
    pub const fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Execute the download and split the outcome per ticker.
    ///
    /// Behavior and trade-offs:
    /// - Every ticker is its own failure boundary: a failed fetch becomes a
    ///   [`TickerFailure`] and the rest of the batch continues.
    /// - `FetchMode::Concurrent` issues all fetches at once; `FetchMode::Sequential`
    ///   issues them in order with the configured spacing in between.
    /// - Successful series and failures are both reported in selection order.
    /// - The request timeout is one deadline shared by the batch. Tickers still
    ///   pending when it passes fail with `RequestTimeout`; finished ones are kept.
    ///
    /// # Errors
    /// Returns an error only if no tickers or no range were specified.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "stockdash::download",
            skip(self),
            fields(tickers = self.tickers.len(), mode = ?self.dashboard.cfg.fetch_mode),
        )
    )]
    pub async fn run(self) -> Result<DownloadReport, DashboardError> {
        if self.tickers.is_empty() {
            return Err(DashboardError::InvalidArg(
                "no tickers specified for download".into(),
            ));
        }
        let Some(range) = self.range else {
            return Err(DashboardError::InvalidArg(
                "no date range specified for download".into(),
            ));
        };

        let dashboard = self.dashboard;
        let deadline = dashboard
            .cfg
            .request_timeout
            .map(|d| tokio::time::Instant::now() + d);

        let outcomes: Vec<Option<Result<TimeSeries, DashboardError>>> =
            match dashboard.cfg.fetch_mode {
                FetchMode::Sequential => {
                    let spacing = dashboard.cfg.request_spacing;
                    let mut out = Vec::with_capacity(self.tickers.len());
                    for (i, t) in self.tickers.iter().enumerate() {
                        if i > 0 && !spacing.is_zero() {
                            tokio::time::sleep(spacing).await;
                        }
                        out.push(
                            crate::core::within_deadline(deadline, dashboard.fetch(t, range))
                                .await,
                        );
                    }
                    out
                }
                _ => {
                    let tasks = self.tickers.iter().map(|t| dashboard.fetch(t, range));
                    crate::join_with_deadline(tasks, deadline).await
                }
            };

        let mut report = DownloadReport::default();
        for (ticker, outcome) in self.tickers.into_iter().zip(outcomes) {
            let result = outcome.unwrap_or_else(|| {
                Err(DashboardError::request_timeout(
                    Capability::DownloadHistory.as_str(),
                ))
            });
            match result {
                Ok(series) => report.series.push(series),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "stockdash::download",
                        ticker = %ticker,
                        error = %e,
                        "ticker fetch failed"
                    );
                    report.failures.push(TickerFailure::new(ticker, e));
                }
            }
        }

        Ok(report)
    }
}

impl Dashboard {
    /// Start a multi-ticker history download.
    ///
    /// ```rust,ignore
    /// let report = dash
    ///     .download()
    ///     .tickers(&[Ticker::new("AAPL")?, Ticker::new("MSFT")?])?
    ///     .range(DateRange::new(start, end)?)
    ///     .run()
    ///     .await?;
    /// for failure in &report.failures {
    ///     eprintln!("{}: {}", failure.ticker, failure.error);
    /// }
    /// ```
    #[must_use]
    pub const fn download(&'_ self) -> DownloadBuilder<'_> {
        DownloadBuilder::new(self)
    }
}
