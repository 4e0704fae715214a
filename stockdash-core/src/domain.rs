//! Market data records as handed out by connectors.

use core::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use stockdash_types::{DashboardError, PriceField};

/// Opaque identifier of one tradable instrument (e.g. `AAPL`).
///
/// Surrounding whitespace is stripped; an empty identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Build a ticker from free text.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the input is empty after trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DashboardError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(DashboardError::InvalidArg("ticker must not be empty".into()));
        }
        Ok(Self(s.to_string()))
    }

    /// Borrow the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = DashboardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range from its first and last day.
    ///
    /// # Errors
    /// Returns `InvalidRange` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days`-long window ending on `today`.
    #[must_use]
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One day of open/high/low/close/adjusted-close/volume. Any field may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OhlcvRecord {
    /// Opening price.
    pub open: Option<f64>,
    /// Session high.
    pub high: Option<f64>,
    /// Session low.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Close adjusted for splits and dividends.
    pub adj_close: Option<f64>,
    /// Traded volume.
    pub volume: Option<u64>,
}

impl OhlcvRecord {
    /// Project a single field; volume is widened to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn field(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
            PriceField::AdjClose => self.adj_close,
            PriceField::Volume => self.volume.map(|v| v as f64),
        }
    }

    /// True when the provider supplied nothing for this day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.open.is_none()
            && self.high.is_none()
            && self.low.is_none()
            && self.close.is_none()
            && self.adj_close.is_none()
            && self.volume.is_none()
    }
}

/// A dated record inside a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day.
    pub date: NaiveDate,
    /// Values for that day.
    pub record: OhlcvRecord,
}

impl Bar {
    /// Pair a date with its record.
    #[must_use]
    pub const fn new(date: NaiveDate, record: OhlcvRecord) -> Self {
        Self { date, record }
    }
}

/// Daily bars for one ticker, ascending by date with unique dates.
///
/// The ordering invariant is established at construction and the series is
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    ticker: Ticker,
    bars: Vec<Bar>,
}

impl TimeSeries {
    /// Build a series from bars in any order.
    ///
    /// Bars are sorted by date; when a date repeats, the first bar supplied wins.
    #[must_use]
    pub fn new(ticker: Ticker, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { ticker, bars }
    }

    /// Build a series from `(date, record)` pairs.
    #[must_use]
    pub fn from_records<I>(ticker: Ticker, records: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, OhlcvRecord)>,
    {
        let bars = records
            .into_iter()
            .map(|(date, record)| Bar { date, record })
            .collect();
        Self::new(ticker, bars)
    }

    /// An empty series for `ticker`.
    #[must_use]
    pub const fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            bars: Vec::new(),
        }
    }

    /// Ticker this series belongs to.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Bars in ascending date order.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// True when the series has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Record for `date`, if the series has one.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&OhlcvRecord> {
        self.bars
            .binary_search_by_key(&date, |b| b.date)
            .ok()
            .map(|i| &self.bars[i].record)
    }

    /// Earliest date in the series.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    /// Latest date in the series.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bars.iter().map(|b| b.date)
    }

    /// One field projected over the whole series.
    pub fn values(&self, field: PriceField) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.bars.iter().map(move |b| (b.date, b.record.field(field)))
    }
}

/// Descriptive company information for the detail panel.
///
/// Every field is optional; providers frequently omit some of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Long company name.
    pub name: Option<String>,
    /// Sector classification.
    pub sector: Option<String>,
    /// Industry classification.
    pub industry: Option<String>,
    /// Market capitalization in the quote currency.
    pub market_cap: Option<f64>,
    /// Trailing price/earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Dividend yield as a fraction (0.005 = 0.5%).
    pub dividend_yield: Option<f64>,
    /// 52-week high.
    pub fifty_two_week_high: Option<f64>,
    /// 52-week low.
    pub fifty_two_week_low: Option<f64>,
    /// Average daily volume.
    pub average_volume: Option<u64>,
    /// Free-text business summary.
    pub summary: Option<String>,
}

impl CompanyInfo {
    /// Dividend yield expressed in percent.
    #[must_use]
    pub fn dividend_yield_pct(&self) -> Option<f64> {
        self.dividend_yield.filter(|y| y.is_finite()).map(|y| y * 100.0)
    }
}
