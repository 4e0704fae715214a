//! Enumerations behind the dashboard's user-facing controls.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Tickers offered by the selector out of the box. Free-text tickers are accepted too.
pub const DEFAULT_UNIVERSE: [&str; 12] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM", "V", "WMT", "DIS", "NFLX",
];

/// Tickers preselected when the dashboard opens.
pub const DEFAULT_TICKERS: [&str; 3] = ["AAPL", "MSFT", "GOOGL"];

/// Length of the default lookback window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// Which OHLCV column feeds the aligned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceField {
    /// Opening price.
    Open,
    /// Session high.
    High,
    /// Session low.
    Low,
    /// Closing price.
    #[default]
    Close,
    /// Close adjusted for splits and dividends.
    AdjClose,
    /// Traded volume.
    Volume,
}

impl PriceField {
    /// Every selectable field in selector order.
    pub const ALL: [Self; 6] = [
        Self::Close,
        Self::Open,
        Self::High,
        Self::Low,
        Self::AdjClose,
        Self::Volume,
    ];

    /// Display label as shown by the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
            Self::AdjClose => "Adj Close",
            Self::Volume => "Volume",
        }
    }

    /// Y-axis caption for charts of this field.
    #[must_use]
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            _ => "Price ($)",
        }
    }

    /// True for the price columns, false for volume.
    #[must_use]
    pub const fn is_price(self) -> bool {
        !matches!(self, Self::Volume)
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for PriceField {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "adjclose" | "adjustedclose" => Ok(Self::AdjClose),
            "volume" => Ok(Self::Volume),
            _ => Err(DashboardError::InvalidArg(format!("unknown price field '{s}'"))),
        }
    }
}

/// Chart flavour requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartKind {
    /// One line per ticker over the aligned table.
    #[default]
    Line,
    /// OHLC candles for a single ticker's raw series.
    Candlestick,
    /// Filled area per ticker over the aligned table.
    Area,
}

impl ChartKind {
    /// Every selectable chart kind in selector order.
    pub const ALL: [Self; 3] = [Self::Line, Self::Candlestick, Self::Area];

    /// Display label as shown by the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Line => "Line Chart",
            Self::Candlestick => "Candlestick",
            Self::Area => "Area Chart",
        }
    }

    /// Whether rendering needs a full OHLC series rather than the aligned table.
    #[must_use]
    pub const fn needs_raw_series(self) -> bool {
        matches!(self, Self::Candlestick)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "line chart" => Ok(Self::Line),
            "candlestick" | "candle" | "candles" => Ok(Self::Candlestick),
            "area" | "area chart" => Ok(Self::Area),
            _ => Err(DashboardError::InvalidArg(format!("unknown chart kind '{s}'"))),
        }
    }
}
