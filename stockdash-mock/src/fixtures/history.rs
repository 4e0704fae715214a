use chrono::{Datelike, NaiveDate, Weekday};
use stockdash_core::{DateRange, OhlcvRecord, Ticker, TimeSeries};

/// Base price per known symbol; unknown symbols have no history.
fn base_price(s: &str) -> Option<f64> {
    Some(match s {
        "AAPL" => 185.0,
        "MSFT" => 370.0,
        "GOOGL" => 140.0,
        "AMZN" => 150.0,
        "META" => 350.0,
        "TSLA" => 245.0,
        "NVDA" => 480.0,
        "JPM" => 170.0,
        "V" => 260.0,
        "WMT" => 160.0,
        "DIS" => 90.0,
        "NFLX" => 480.0,
        _ => return None,
    })
}

/// Symbol-specific seed so every ticker walks differently but reproducibly.
fn seed(s: &str) -> u64 {
    s.bytes()
        .fold(0xcbf2_9ce4_8422_2325, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3))
}

/// Deterministic value in `[-1, 1)` for a symbol and day.
#[allow(clippy::cast_precision_loss)]
fn noise(seed: u64, day: i32) -> f64 {
    let mut x = seed ^ (u64::from(day.unsigned_abs()).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    (x % 20_000) as f64 / 10_000.0 - 1.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// One synthetic bar for a trading day.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar(seed: u64, base: f64, date: NaiveDate) -> OhlcvRecord {
    let day = date.num_days_from_ce();
    // slow oscillation plus a small daily wiggle keeps prices positive
    let trend = f64::from(day % 180) / 180.0;
    let close = base * (0.9 + 0.2 * trend) * (1.0 + 0.01 * noise(seed, day));
    let open = close * (1.0 + 0.005 * noise(seed.rotate_left(7), day));
    let high = open.max(close) * (1.0 + 0.004 * noise(seed.rotate_left(13), day).abs());
    let low = open.min(close) * (1.0 - 0.004 * noise(seed.rotate_left(19), day).abs());
    let volume = 5_000_000 + (noise(seed.rotate_left(29), day).abs() * 5_000_000.0) as u64;
    OhlcvRecord {
        open: Some(round2(open)),
        high: Some(round2(high)),
        low: Some(round2(low)),
        close: Some(round2(close)),
        adj_close: Some(round2(close * 0.995)),
        volume: Some(volume),
    }
}

/// Weekday bars covering `range` for a known symbol.
pub fn by_symbol(ticker: &Ticker, range: DateRange) -> Option<TimeSeries> {
    let s = ticker.as_str();
    if s == "EMPTY" {
        return Some(TimeSeries::empty(ticker.clone()));
    }
    let base = base_price(s)?;
    let seed = seed(s);
    let rows = range
        .start()
        .iter_days()
        .take_while(|d| *d <= range.end())
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .map(|d| (d, bar(seed, base, d)));
    Some(TimeSeries::from_records(ticker.clone(), rows))
}
