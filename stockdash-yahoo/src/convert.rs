//! Mapping between `yfinance-rs` payloads and stockdash domain types.

use chrono::{Days, NaiveDate, TimeDelta};
use paft::market::action::Action;
use paft::market::requests::history::Interval;
use paft::money::Money;
use rust_decimal::prelude::ToPrimitive;
use stockdash_core::{CompanyInfo, DateRange, OhlcvRecord};
use yfinance_rs as yf;

/// Lookback used for the 52-week figures and the trailing dividend yield.
pub(crate) const TRAILING_YEAR_DAYS: u64 = 365;

fn midnight_ts(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

fn daily(
    start: NaiveDate,
    end: NaiveDate,
    include_actions: bool,
) -> yf::core::services::HistoryRequest {
    // Yahoo's period end is exclusive
    let until = end.checked_add_days(Days::new(1)).unwrap_or(end);
    yf::core::services::HistoryRequest {
        range: None,
        period: Some((midnight_ts(start), midnight_ts(until))),
        interval: Interval::D1,
        include_prepost: false,
        include_actions,
        auto_adjust: true,
        keepna: false,
    }
}

/// Daily candles covering `range`, both ends included.
pub(crate) fn history_request(range: DateRange) -> yf::core::services::HistoryRequest {
    daily(range.start(), range.end(), false)
}

/// Daily candles plus dividends for the year ending on `today`.
pub(crate) fn trailing_year_request(today: NaiveDate) -> yf::core::services::HistoryRequest {
    let start = today
        .checked_sub_days(Days::new(TRAILING_YEAR_DAYS))
        .unwrap_or(today);
    daily(start, today, true)
}

fn amount(m: &Money) -> Option<f64> {
    m.amount().to_f64().filter(|v| v.is_finite())
}

/// One candle as an unadjusted record.
///
/// Auto-adjusted candles scale open, high, low and close by one factor; the
/// raw close in `close_unadj` recovers it so every price field is unadjusted
/// and `adj_close` carries the adjusted close.
fn record(c: &yf::Candle, adjusted: bool) -> OhlcvRecord {
    let close = amount(&c.close);
    let raw_close = c.close_unadj.as_ref().and_then(amount).or(close);
    let factor = match (raw_close, close) {
        (Some(raw), Some(adj)) if adjusted && adj != 0.0 => raw / adj,
        _ => 1.0,
    };
    let unadjust = |m: &Money| amount(m).map(|v| v * factor);
    OhlcvRecord {
        open: unadjust(&c.open),
        high: unadjust(&c.high),
        low: unadjust(&c.low),
        close: raw_close,
        adj_close: if adjusted { close } else { None },
        volume: c.volume,
    }
}

/// Candles falling inside `range`, dated in the exchange's local time.
pub(crate) fn daily_rows(
    resp: &yf::HistoryResponse,
    range: DateRange,
) -> Vec<(NaiveDate, OhlcvRecord)> {
    let offset = resp
        .meta
        .as_ref()
        .and_then(|m| m.utc_offset_seconds)
        .map_or(0, i64::from);
    resp.candles
        .iter()
        .filter_map(|c| {
            let date = (c.ts + TimeDelta::seconds(offset)).date_naive();
            let rec = record(c, resp.adjusted);
            (range.contains(date) && !rec.is_empty()).then_some((date, rec))
        })
        .collect()
}

/// Assemble the detail panel from a profile and, when available, a trailing
/// year of daily history.
///
/// Market capitalization and P/E are not derivable from either source and
/// stay `None`.
pub(crate) fn company_info(
    profile: &yf::profile::Profile,
    year: Option<&yf::HistoryResponse>,
) -> CompanyInfo {
    let mut info = match profile {
        yf::profile::Profile::Company(c) => CompanyInfo {
            name: Some(c.name.clone()),
            sector: c.sector.clone(),
            industry: c.industry.clone(),
            summary: c.summary.clone(),
            ..CompanyInfo::default()
        },
        yf::profile::Profile::Fund(f) => CompanyInfo {
            name: Some(f.name.clone()),
            ..CompanyInfo::default()
        },
    };
    if let Some(resp) = year {
        apply_trailing_year(&mut info, resp);
    }
    info
}

fn apply_trailing_year(info: &mut CompanyInfo, resp: &yf::HistoryResponse) {
    let records: Vec<OhlcvRecord> = resp
        .candles
        .iter()
        .map(|c| record(c, resp.adjusted))
        .collect();

    info.fifty_two_week_high = records
        .iter()
        .filter_map(|r| r.high)
        .reduce(f64::max);
    info.fifty_two_week_low = records.iter().filter_map(|r| r.low).reduce(f64::min);

    let volumes: Vec<u64> = records.iter().filter_map(|r| r.volume).collect();
    if !volumes.is_empty() {
        let total: u128 = volumes.iter().map(|&v| u128::from(v)).sum();
        let n = u128::try_from(volumes.len()).unwrap_or(u128::MAX);
        info.average_volume = u64::try_from((total + n / 2) / n).ok();
    }

    let dividends: Vec<f64> = resp
        .actions
        .iter()
        .filter_map(|a| match a {
            Action::Dividend { amount: paid, .. } => amount(paid),
            _ => None,
        })
        .collect();
    let last_close = records.iter().rev().find_map(|r| r.close);
    if !dividends.is_empty()
        && let Some(px) = last_close.filter(|px| *px > 0.0)
    {
        info.dividend_yield = Some(dividends.iter().sum::<f64>() / px);
    }
}
