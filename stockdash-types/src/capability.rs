use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Daily OHLCV history for one ticker.
    History,
    /// Batch history download across the selected tickers.
    DownloadHistory,
    /// Descriptive company information for one ticker.
    CompanyInfo,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::DownloadHistory => "download:history",
            Self::CompanyInfo => "company-info",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
