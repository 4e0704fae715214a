use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the stockdash workspace.
///
/// This covers request validation, provider-tagged failures, not-found
/// conditions, timeouts, and the two dashboard-level outcomes: a batch in which
/// no ticker produced data, and a failed company-info lookup.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DashboardError {
    /// The requested date range starts after it ends.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested first calendar day.
        start: NaiveDate,
        /// Requested last calendar day.
        end: NaiveDate,
    },

    /// Invalid input argument (empty ticker, duplicate selection, ...).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability is not implemented by any registered connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history").
        capability: String,
    },

    /// Issues with the returned or expected data (malformed payload, missing fields).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A symbol is unknown to the provider or the provider returned no rows.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "history for AAPL".
        what: String,
    },

    /// All registered connectors failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<DashboardError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "history", "company-info").
        capability: String,
    },

    /// The overall batch exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Every selected ticker failed to produce data.
    #[error("could not retrieve data for any of the selected tickers: {tickers:?}")]
    NoDataAvailable {
        /// Tickers that were requested, in selection order.
        tickers: Vec<String>,
        /// The per-ticker failures that led to the empty result.
        failures: Vec<DashboardError>,
    },

    /// Descriptive company information could not be fetched for one ticker.
    #[error("error fetching details for {ticker}: {msg}")]
    InfoLookup {
        /// Ticker whose detail lookup failed.
        ticker: String,
        /// Human-readable cause.
        msg: String,
    },
}

impl DashboardError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build an `InfoLookup` error for a ticker.
    pub fn info_lookup(ticker: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InfoLookup {
            ticker: ticker.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if a later identical request could plausibly succeed.
    ///
    /// Timeouts are transient; so is an aggregate made only of transient errors.
    /// Everything else is treated as an explicit answer from the provider.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ProviderTimeout { .. } | Self::RequestTimeout { .. } => true,
            Self::AllProvidersFailed(inner) => {
                !inner.is_empty() && inner.iter().all(Self::is_transient)
            }
            _ => false,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
