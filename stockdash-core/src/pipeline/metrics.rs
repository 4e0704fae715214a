use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::align::AlignedTable;
use crate::domain::Ticker;

/// Headline figures for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMetric {
    /// Ticker the metric belongs to.
    pub ticker: Ticker,
    /// Date of the latest non-missing value.
    pub latest_date: NaiveDate,
    /// Latest non-missing value.
    pub latest: f64,
    /// The non-missing value before `latest`, when there is one.
    pub previous: Option<f64>,
    /// Percent change from `previous` to `latest`.
    ///
    /// `None` with fewer than two values or a zero `previous`; render as "N/A".
    pub change_pct: Option<f64>,
}

/// First-to-last performance of one ticker over the table's span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Ticker the summary belongs to.
    pub ticker: Ticker,
    /// Date of the first non-missing value.
    pub start_date: NaiveDate,
    /// First non-missing value.
    pub start_value: f64,
    /// Date of the last non-missing value.
    pub end_date: NaiveDate,
    /// Last non-missing value.
    pub end_value: f64,
    /// Percent change from `start_value` to `end_value`; `None` when `start_value` is zero.
    pub change_pct: Option<f64>,
}

/// `(to - from) / from * 100`, or `None` when that is not a finite number.
#[must_use]
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    let pct = (to - from) / from * 100.0;
    pct.is_finite().then_some(pct)
}

/// Latest value and last-step percent change per column, in column order.
///
/// The last step compares the last two non-missing values, which need not sit on
/// adjacent rows. Columns without any value are omitted.
#[must_use]
pub fn current_metrics(table: &AlignedTable) -> Vec<CurrentMetric> {
    table
        .columns()
        .iter()
        .filter_map(|ticker| {
            let mut tail = table.present(ticker).collect::<Vec<_>>().into_iter().rev();
            let (latest_date, latest) = tail.next()?;
            let previous = tail.next().map(|(_, v)| v);
            Some(CurrentMetric {
                ticker: ticker.clone(),
                latest_date,
                latest,
                previous,
                change_pct: previous.and_then(|p| pct_change(p, latest)),
            })
        })
        .collect()
}

/// First/last value and percent change per column, in selection order.
///
/// Columns without any value are omitted. A column with a single value reports
/// a change of zero.
#[must_use]
pub fn performance_summary(table: &AlignedTable) -> Vec<PerformanceSummary> {
    table
        .columns()
        .iter()
        .filter_map(|ticker| {
            let mut values = table.present(ticker);
            let (start_date, start_value) = values.next()?;
            let (end_date, end_value) = values.last().unwrap_or((start_date, start_value));
            Some(PerformanceSummary {
                ticker: ticker.clone(),
                start_date,
                start_value,
                end_date,
                end_value,
                change_pct: pct_change(start_value, end_value),
            })
        })
        .collect()
}
