use std::sync::Arc;

use crate::helpers::{AAPL, MSFT, d, t};
use stockdash::{CacheConfig, ChartKind, Dashboard, PriceField, Selection};
use stockdash_mock::MockConnector;

#[tokio::test]
async fn snapshot_keeps_full_ohlc_series_for_candlesticks() {
    let raw = Arc::new(MockConnector::new());
    let dash = Dashboard::builder()
        .with_cached_connector(raw, &CacheConfig::default())
        .build()
        .unwrap();

    let sel = Selection::new(
        vec![t("FAIL"), t(MSFT), t(AAPL)],
        d(2024, 3, 4),
        d(2024, 3, 15),
    )
    .with_chart(ChartKind::Candlestick)
    .with_field(PriceField::Volume);
    let snap = dash.snapshot(&sel).await.unwrap();

    assert!(snap.selection.chart.needs_raw_series());
    let candidates: Vec<&str> = snap
        .candlestick_candidates()
        .into_iter()
        .map(|t| t.as_str())
        .collect();
    assert_eq!(candidates, [MSFT, AAPL]);

    let first = snap.candlestick_series(None).unwrap();
    assert_eq!(first.ticker(), &t(MSFT));
    let aapl = snap.candlestick_series(Some(&t(AAPL))).unwrap();
    assert_eq!(aapl.len(), 10);
    assert!(aapl.bars().iter().all(|b| {
        let r = b.record;
        r.open.is_some() && r.high.is_some() && r.low.is_some() && r.close.is_some()
    }));
    assert!(snap.candlestick_series(Some(&t("FAIL"))).is_none());

    // the table still carries the selected field, not the candles
    assert_eq!(snap.table.field(), PriceField::Volume);
    assert_eq!(snap.table.row_count(), 10);
}

#[tokio::test]
async fn snapshot_round_trips_through_serde() {
    let dash = Dashboard::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();
    let sel = Selection::new(vec![t(AAPL)], d(2024, 3, 4), d(2024, 3, 8));
    let snap = dash.snapshot(&sel).await.unwrap();

    let json = serde_json::to_string(&snap).unwrap();
    let back: stockdash::DashboardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.selection, snap.selection);
    assert_eq!(back.series, snap.series);
}
