use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Ticker, TimeSeries};
use stockdash_types::{DashboardError, PriceField};

/// Date-aligned view of one field across several tickers.
///
/// Rows are the ascending union of every contributing series' dates. Columns are
/// the contributing tickers in selection order. A cell is `None` when the ticker
/// has no bar for that date or the provider left the field undefined; no value
/// is ever interpolated or carried forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAlignedTable")]
pub struct AlignedTable {
    field: PriceField,
    columns: Vec<Ticker>,
    dates: Vec<NaiveDate>,
    // row-major, `dates.len()` rows of `columns.len()` cells
    cells: Vec<Option<f64>>,
}

#[derive(Deserialize)]
struct RawAlignedTable {
    field: PriceField,
    columns: Vec<Ticker>,
    dates: Vec<NaiveDate>,
    cells: Vec<Option<f64>>,
}

impl TryFrom<RawAlignedTable> for AlignedTable {
    type Error = DashboardError;

    fn try_from(raw: RawAlignedTable) -> Result<Self, Self::Error> {
        let bad = |msg: &str| Err(DashboardError::Data(format!("aligned table: {msg}")));
        if raw.columns.is_empty() != raw.dates.is_empty() {
            return bad("rows and columns must both be present or both be absent");
        }
        if raw.cells.len() != raw.dates.len() * raw.columns.len() {
            return bad("cell count does not match rows times columns");
        }
        if raw.dates.windows(2).any(|w| w[0] >= w[1]) {
            return bad("dates must be strictly ascending");
        }
        let mut seen = HashSet::new();
        if !raw.columns.iter().all(|t| seen.insert(t)) {
            return bad("duplicate column");
        }
        Ok(Self {
            field: raw.field,
            columns: raw.columns,
            dates: raw.dates,
            cells: raw.cells,
        })
    }
}

/// A borrowed row of an [`AlignedTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow<'a> {
    /// Row date.
    pub date: NaiveDate,
    /// One cell per column, in column order.
    pub values: &'a [Option<f64>],
}

impl AlignedTable {
    /// A table with no rows and no columns.
    #[must_use]
    pub const fn empty(field: PriceField) -> Self {
        Self {
            field,
            columns: Vec::new(),
            dates: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Field the table was built from.
    #[must_use]
    pub const fn field(&self) -> PriceField {
        self.field
    }

    /// Tickers that contributed data, in selection order.
    #[must_use]
    pub fn columns(&self) -> &[Ticker] {
        &self.columns
    }

    /// Row dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// True when no ticker contributed data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Iterate rows in date order.
    pub fn rows(&self) -> impl Iterator<Item = AlignedRow<'_>> + '_ {
        // an empty table has neither rows nor columns
        let width = self.columns.len().max(1);
        self.dates
            .iter()
            .zip(self.cells.chunks(width))
            .map(|(date, values)| AlignedRow {
                date: *date,
                values,
            })
    }

    /// Position of `ticker` among the columns.
    #[must_use]
    pub fn column_index(&self, ticker: &Ticker) -> Option<usize> {
        self.columns.iter().position(|t| t == ticker)
    }

    /// Cell for `(date, ticker)`.
    ///
    /// Unknown dates and tickers that are not columns (including tickers whose
    /// fetch failed) read as missing.
    #[must_use]
    pub fn value(&self, date: NaiveDate, ticker: &Ticker) -> Option<f64> {
        let col = self.column_index(ticker)?;
        let row = self.dates.binary_search(&date).ok()?;
        self.cells[row * self.columns.len() + col]
    }

    /// Every row of one column as `(date, cell)` pairs.
    pub fn column(
        &self,
        ticker: &Ticker,
    ) -> Option<impl Iterator<Item = (NaiveDate, Option<f64>)> + '_> {
        let col = self.column_index(ticker)?;
        let width = self.columns.len();
        Some(
            self.dates
                .iter()
                .enumerate()
                .map(move |(row, date)| (*date, self.cells[row * width + col])),
        )
    }

    /// Non-missing cells of one column in date order.
    pub fn present(&self, ticker: &Ticker) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.column(ticker)
            .into_iter()
            .flatten()
            .filter_map(|(d, v)| v.map(|v| (d, v)))
    }
}

/// Align `series` on the union of their dates for one `field`.
///
/// `series` is taken in selection order. Empty series are skipped and a
/// repeated ticker keeps its first series. With no contributing series the
/// result is [`AlignedTable::empty`].
#[must_use]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(series), fields(series = series.len(), field = %field))
)]
pub fn align(series: &[TimeSeries], field: PriceField) -> AlignedTable {
    let mut seen: HashSet<&Ticker> = HashSet::new();
    let contributing: Vec<&TimeSeries> = series
        .iter()
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.ticker()))
        .collect();

    if contributing.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!("no series with data; returning empty table");
        return AlignedTable::empty(field);
    }

    let dates: Vec<NaiveDate> = contributing
        .iter()
        .flat_map(|s| s.dates())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let width = contributing.len();
    let mut cells = vec![None; dates.len() * width];
    for (col, s) in contributing.iter().enumerate() {
        // both sides are ascending, so walk them together
        let mut row = 0;
        for bar in s.bars() {
            while dates[row] < bar.date {
                row += 1;
            }
            cells[row * width + col] = bar.record.field(field);
        }
    }

    AlignedTable {
        field,
        columns: contributing.iter().map(|s| s.ticker().clone()).collect(),
        dates,
        cells,
    }
}
