use std::sync::Arc;
use std::time::Duration;

use crate::helpers::{AAPL, MSFT, d, dashboard_with, dynamic, series, t};
use stockdash::{CacheConfig, CompanyInfo, Dashboard, DashboardError, Selection};
use stockdash_mock::{MockBehavior, MockConnector};

#[tokio::test]
async fn info_lookup_returns_fixture_fields() {
    let dash = dashboard_with(Arc::new(MockConnector::new()));

    let lookup = dash.company_info(&t(AAPL)).await.unwrap();

    assert_eq!(lookup.ticker, t(AAPL));
    assert_eq!(lookup.info.name.as_deref(), Some("Apple Inc."));
    assert_eq!(lookup.info.sector.as_deref(), Some("Technology"));
    let pct = lookup.info.dividend_yield_pct().unwrap();
    assert!((pct - 0.52).abs() < 1e-9);
}

#[tokio::test]
async fn any_failure_becomes_info_lookup_error() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_info_behavior(
        t(MSFT),
        MockBehavior::Fail(DashboardError::connector("c1", "401 unauthorized")),
    )
    .await;
    ctl.set_info_behavior(t("SLOW"), MockBehavior::Hang).await;
    let dash = Dashboard::builder()
        .with_connector(conn)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let err = dash.company_info(&t(MSFT)).await.unwrap_err();
    assert_eq!(
        err,
        DashboardError::info_lookup(MSFT, "c1 failed: 401 unauthorized")
    );

    let err = dash.company_info(&t("ZZZZ")).await.unwrap_err();
    assert_eq!(
        err,
        DashboardError::info_lookup("ZZZZ", "not found: company info for ZZZZ")
    );

    let err = dash.company_info(&t("SLOW")).await.unwrap_err();
    assert!(matches!(err, DashboardError::InfoLookup { ref ticker, .. } if ticker == "SLOW"));
}

#[tokio::test]
async fn info_failure_does_not_touch_an_existing_snapshot() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 100.0), (d(2024, 1, 3), 101.0)])),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL)], d(2024, 1, 1), d(2024, 1, 5));
    let snap = dash.snapshot(&sel).await.unwrap();
    let before = snap.clone();

    assert!(dash.company_info(&t(AAPL)).await.is_err());
    assert_eq!(snap, before);

    ctl.set_info_behavior(t(AAPL), MockBehavior::Return(CompanyInfo::default()))
        .await;
    assert!(dash.company_info(&t(AAPL)).await.is_ok());
}

#[tokio::test]
async fn cached_info_is_served_once_per_ticker() {
    let raw = Arc::new(MockConnector::new());
    let dash = Dashboard::builder()
        .with_cached_connector(raw.clone(), &CacheConfig::default())
        .build()
        .unwrap();

    dash.company_info(&t(MSFT)).await.unwrap();
    dash.company_info(&t(MSFT)).await.unwrap();
    assert!(dash.company_info(&t("NVDA")).await.is_err());
    assert!(dash.company_info(&t("NVDA")).await.is_err());

    assert_eq!(raw.info_calls(), 2);
}
