// Lightweight fixtures shared by the router tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use stockdash::connector::MarketDataConnector;
use stockdash::{Dashboard, DateRange, OhlcvRecord, Ticker, TimeSeries};
use stockdash_mock::{DynamicMockConnector, DynamicMockController};

/// Common ticker constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const GOOGL: &str = "GOOGL";

pub fn t(s: &str) -> Ticker {
    Ticker::new(s).expect("valid ticker")
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).expect("valid range")
}

/// A record whose every price field equals `px`.
pub fn flat(px: f64) -> OhlcvRecord {
    OhlcvRecord {
        open: Some(px),
        high: Some(px),
        low: Some(px),
        close: Some(px),
        adj_close: Some(px),
        volume: Some(1_000),
    }
}

/// Series with one flat bar per `(date, price)` pair.
pub fn series(ticker: &str, points: &[(NaiveDate, f64)]) -> TimeSeries {
    TimeSeries::from_records(t(ticker), points.iter().map(|&(dt, px)| (dt, flat(px))))
}

pub fn dynamic(name: &'static str) -> (Arc<dyn MarketDataConnector>, DynamicMockController) {
    DynamicMockConnector::new_with_controller(name)
}

pub fn dashboard_with(conn: Arc<dyn MarketDataConnector>) -> Dashboard {
    Dashboard::builder()
        .with_connector(conn)
        .build()
        .expect("dashboard")
}
