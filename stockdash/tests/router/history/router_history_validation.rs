use crate::helpers::{AAPL, d, dashboard_with, dynamic, series, t};
use stockdash::DashboardError;
use stockdash_mock::MockBehavior;

#[tokio::test]
async fn inverted_range_is_rejected_before_any_request() {
    let (conn, ctl) = dynamic("c1");
    let dash = dashboard_with(conn);

    let err = dash
        .fetch_between(AAPL, d(2024, 2, 1), d(2024, 1, 1))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DashboardError::InvalidRange {
            start: d(2024, 2, 1),
            end: d(2024, 1, 1),
        }
    );
    assert!(ctl.history_requests().await.is_empty());
}

#[tokio::test]
async fn blank_ticker_is_rejected_before_any_request() {
    let (conn, ctl) = dynamic("c1");
    let dash = dashboard_with(conn);

    let err = dash
        .fetch_between("   ", d(2024, 1, 1), d(2024, 1, 2))
        .await
        .unwrap_err();

    assert!(matches!(err, DashboardError::InvalidArg(_)));
    assert!(ctl.history_requests().await.is_empty());
}

#[tokio::test]
async fn single_day_range_is_forwarded_unchanged() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 100.0)])),
    )
    .await;
    let dash = dashboard_with(conn);

    let s = dash
        .fetch_between(" AAPL ", d(2024, 1, 2), d(2024, 1, 2))
        .await
        .unwrap();

    assert_eq!(s.ticker(), &t(AAPL));
    let reqs = ctl.history_requests().await;
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].1.start(), d(2024, 1, 2));
    assert_eq!(reqs[0].1.end(), d(2024, 1, 2));
}
