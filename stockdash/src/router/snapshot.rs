//! One full dashboard pass: validate the selection, download, align, summarize.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockdash_core::{
    AlignedTable, ChartKind, CurrentMetric, DEFAULT_LOOKBACK_DAYS, DEFAULT_TICKERS,
    DashboardError, DateRange, PerformanceSummary, PriceField, Ticker, TickerFailure, TimeSeries,
    align, current_metrics, performance_summary,
};

use crate::Dashboard;

/// What the user picked in the dashboard controls.
///
/// Dates are kept raw so an inverted range surfaces as `InvalidRange` when the
/// snapshot is requested rather than when the selection is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected tickers in the order they were picked.
    pub tickers: Vec<Ticker>,
    /// First calendar day.
    pub start: NaiveDate,
    /// Last calendar day (inclusive).
    pub end: NaiveDate,
    /// Requested chart flavour.
    pub chart: ChartKind,
    /// Field projected into the aligned table.
    pub field: PriceField,
}

impl Selection {
    /// Line chart of closing prices for `tickers` between `start` and `end`.
    #[must_use]
    pub fn new(tickers: Vec<Ticker>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            tickers,
            start,
            end,
            chart: ChartKind::default(),
            field: PriceField::default(),
        }
    }

    /// The selection the dashboard opens with: the default tickers over the
    /// last year, closing prices on a line chart.
    #[must_use]
    pub fn default_for(today: NaiveDate) -> Self {
        let range = DateRange::last_days(today, DEFAULT_LOOKBACK_DAYS);
        let tickers = DEFAULT_TICKERS
            .iter()
            .filter_map(|s| Ticker::new(s).ok())
            .collect();
        Self::new(tickers, range.start(), range.end())
    }

    /// Parse free-text tickers (e.g. from a comma-separated input field).
    ///
    /// Blank entries are skipped.
    #[must_use]
    pub fn with_ticker_text(mut self, text: &str) -> Self {
        self.tickers = text
            .split([',', ' ', ';'])
            .filter_map(|s| Ticker::new(s).ok())
            .collect();
        self
    }

    /// Set the chart flavour.
    #[must_use]
    pub const fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    /// Set the projected field.
    #[must_use]
    pub const fn with_field(mut self, field: PriceField) -> Self {
        self.field = field;
        self
    }

    /// Validated date range.
    ///
    /// # Errors
    /// Returns `InvalidRange` when `start` is after `end`.
    pub fn range(&self) -> Result<DateRange, DashboardError> {
        DateRange::new(self.start, self.end)
    }

    /// Selected tickers with repeats removed, keeping the first occurrence.
    #[must_use]
    pub fn unique_tickers(&self) -> Vec<Ticker> {
        let mut out: Vec<Ticker> = Vec::with_capacity(self.tickers.len());
        for t in &self.tickers {
            if !out.contains(t) {
                out.push(t.clone());
            }
        }
        out
    }
}

/// Everything the rendering layer needs for one dashboard pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// The selection this snapshot answers.
    pub selection: Selection,
    /// The validated range that was fetched.
    pub range: DateRange,
    /// Union-of-dates table of the selected field.
    pub table: AlignedTable,
    /// Headline metrics per ticker with data, in selection order.
    pub current: Vec<CurrentMetric>,
    /// First-to-last performance per ticker with data, in selection order.
    pub performance: Vec<PerformanceSummary>,
    /// Full OHLCV series per ticker with data, kept for candlestick charts.
    pub series: Vec<TimeSeries>,
    /// Tickers that produced no data, with the reason.
    pub failures: Vec<TickerFailure>,
}

impl DashboardSnapshot {
    /// True when at least one selected ticker failed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failure recorded for `ticker`, for an inline error badge.
    #[must_use]
    pub fn failure_for(&self, ticker: &Ticker) -> Option<&DashboardError> {
        self.failures
            .iter()
            .find(|f| &f.ticker == ticker)
            .map(|f| &f.error)
    }

    /// Headline metric for `ticker`, if it produced data.
    #[must_use]
    pub fn current_for(&self, ticker: &Ticker) -> Option<&CurrentMetric> {
        self.current.iter().find(|m| &m.ticker == ticker)
    }

    /// Tickers a candlestick chart can be drawn for, in selection order.
    #[must_use]
    pub fn candlestick_candidates(&self) -> Vec<&Ticker> {
        self.series.iter().map(TimeSeries::ticker).collect()
    }

    /// Raw OHLCV series for a candlestick chart.
    ///
    /// `None` picks the first ticker with data. Returns `None` when the
    /// requested ticker has no series.
    #[must_use]
    pub fn candlestick_series(&self, ticker: Option<&Ticker>) -> Option<&TimeSeries> {
        match ticker {
            Some(t) => self.series.iter().find(|s| s.ticker() == t),
            None => self.series.first(),
        }
    }
}

impl Dashboard {
    /// Run one full dashboard pass for `selection`.
    ///
    /// Behavior:
    /// - Rejects an empty ticker selection (`InvalidArg`) and an inverted range
    ///   (`InvalidRange`) before anything is fetched.
    /// - Repeated tickers are fetched once.
    /// - Per-ticker failures are kept in the snapshot; the remaining tickers are
    ///   aligned and summarized normally.
    ///
    /// # Errors
    /// Returns `NoDataAvailable` with every per-ticker failure when no ticker
    /// produced data. A ticker cut off by the request deadline is one of those
    /// failures, not an error of the whole call.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "stockdash::snapshot",
            skip(self, selection),
            fields(
                tickers = selection.tickers.len(),
                start = %selection.start,
                end = %selection.end,
                field = %selection.field,
            ),
        )
    )]
    pub async fn snapshot(&self, selection: &Selection) -> Result<DashboardSnapshot, DashboardError> {
        if selection.tickers.is_empty() {
            return Err(DashboardError::InvalidArg(
                "select at least one ticker".into(),
            ));
        }
        let range = selection.range()?;
        let tickers = selection.unique_tickers();

        let report = self.download().tickers(&tickers)?.range(range).run().await?;

        if report.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "stockdash::snapshot", "no selected ticker produced data");
            return Err(DashboardError::NoDataAvailable {
                tickers: tickers.iter().map(ToString::to_string).collect(),
                failures: report.failures.into_iter().map(|f| f.error).collect(),
            });
        }

        let table = align(&report.series, selection.field);
        let current = current_metrics(&table);
        let performance = performance_summary(&table);

        Ok(DashboardSnapshot {
            selection: selection.clone(),
            range,
            table,
            current,
            performance,
            series: report.series,
            failures: report.failures,
        })
    }
}
