use crate::helpers::{AAPL, GOOGL, MSFT, d, dashboard_with, dynamic, series, t};
use stockdash::{DashboardError, PriceField, Selection};
use stockdash_mock::MockBehavior;

#[tokio::test]
async fn one_ticker_with_one_point_and_one_failure() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 1), 100.0)])),
    )
    .await;
    ctl.set_history_behavior(
        t(MSFT),
        MockBehavior::Fail(DashboardError::connector("c1", "upstream error")),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL), t(MSFT)], d(2024, 1, 1), d(2024, 1, 31));
    let snap = dash.snapshot(&sel).await.unwrap();

    // one date, AAPL = 100, MSFT missing
    assert_eq!(snap.table.dates(), [d(2024, 1, 1)]);
    assert_eq!(snap.table.value(d(2024, 1, 1), &t(AAPL)), Some(100.0));
    assert_eq!(snap.table.value(d(2024, 1, 1), &t(MSFT)), None);

    assert_eq!(snap.performance.len(), 1);
    assert_eq!(snap.performance[0].ticker, t(AAPL));
    assert_eq!(snap.performance[0].change_pct, Some(0.0));

    assert_eq!(snap.current.len(), 1);
    assert_eq!(snap.current[0].latest, 100.0);
    assert_eq!(snap.current[0].change_pct, None);
    assert!(snap.current_for(&t(MSFT)).is_none());

    assert!(snap.is_partial());
    assert_eq!(
        snap.failure_for(&t(MSFT)),
        Some(&DashboardError::connector("c1", "upstream error"))
    );
}

#[tokio::test]
async fn every_ticker_failing_is_no_data_available() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Fail(DashboardError::connector("c1", "boom")),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL), t(MSFT)], d(2024, 1, 1), d(2024, 1, 31));
    let err = dash.snapshot(&sel).await.unwrap_err();

    match err {
        DashboardError::NoDataAvailable { tickers, failures } => {
            assert_eq!(tickers, [AAPL, MSFT]);
            assert_eq!(
                failures,
                vec![
                    DashboardError::connector("c1", "boom"),
                    DashboardError::not_found("history for MSFT"),
                ]
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn single_day_selection_has_one_row_and_zero_change() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 185.5)])),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL)], d(2024, 1, 2), d(2024, 1, 2));
    let snap = dash.snapshot(&sel).await.unwrap();

    assert_eq!(snap.table.row_count(), 1);
    assert_eq!(snap.performance[0].change_pct, Some(0.0));
    assert!(!snap.is_partial());
}

#[tokio::test]
async fn two_points_give_ten_percent() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(
            AAPL,
            &[(d(2024, 1, 2), 100.0), (d(2024, 1, 3), 110.0)],
        )),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL)], d(2024, 1, 1), d(2024, 1, 5));
    let snap = dash.snapshot(&sel).await.unwrap();

    let pct = snap.performance[0].change_pct.unwrap();
    assert!((pct - 10.0).abs() < 1e-9);
    let last = snap.current[0].change_pct.unwrap();
    assert!((last - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn union_of_dates_with_gaps_and_selection_order() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(MSFT),
        MockBehavior::Return(series(
            MSFT,
            &[(d(2024, 1, 2), 370.0), (d(2024, 1, 4), 380.0)],
        )),
    )
    .await;
    ctl.set_history_behavior(
        t(GOOGL),
        MockBehavior::Return(series(
            GOOGL,
            &[(d(2024, 1, 3), 140.0), (d(2024, 1, 4), 140.0)],
        )),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(MSFT), t(GOOGL)], d(2024, 1, 1), d(2024, 1, 5))
        .with_field(PriceField::Close);
    let snap = dash.snapshot(&sel).await.unwrap();

    assert_eq!(snap.table.dates(), [d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]);
    assert_eq!(snap.table.columns(), [t(MSFT), t(GOOGL)]);
    assert_eq!(snap.table.value(d(2024, 1, 3), &t(MSFT)), None);
    assert_eq!(snap.table.value(d(2024, 1, 2), &t(GOOGL)), None);

    let order: Vec<&str> = snap.performance.iter().map(|p| p.ticker.as_str()).collect();
    assert_eq!(order, [MSFT, GOOGL]);
    // a flat price is a real 0%, not missing data
    assert_eq!(snap.performance[1].change_pct, Some(0.0));
}

#[tokio::test]
async fn invalid_selection_is_rejected_before_fetching() {
    let (conn, ctl) = dynamic("c1");
    let dash = dashboard_with(conn);

    let inverted = Selection::new(vec![t(AAPL)], d(2024, 2, 1), d(2024, 1, 1));
    let err = dash.snapshot(&inverted).await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidRange { .. }));

    let nothing = Selection::new(vec![], d(2024, 1, 1), d(2024, 2, 1));
    let err = dash.snapshot(&nothing).await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArg(_)));

    assert!(ctl.history_requests().await.is_empty());
}

#[tokio::test]
async fn repeated_ticker_in_selection_is_fetched_once() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 100.0)])),
    )
    .await;
    let dash = dashboard_with(conn);

    let sel = Selection::new(vec![t(AAPL), t(AAPL)], d(2024, 1, 1), d(2024, 1, 5));
    let snap = dash.snapshot(&sel).await.unwrap();

    assert_eq!(snap.table.columns(), [t(AAPL)]);
    assert_eq!(ctl.history_calls(&t(AAPL)).await, 1);
}

#[tokio::test]
async fn request_deadline_keeps_tickers_that_answered() {
    let (conn, ctl) = dynamic("c1");
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 185.0)])),
    )
    .await;
    ctl.set_history_behavior(t(MSFT), MockBehavior::Hang).await;
    let dash = stockdash::Dashboard::builder()
        .with_connector(conn)
        .provider_timeout(std::time::Duration::from_secs(5))
        .request_timeout(std::time::Duration::from_millis(30))
        .build()
        .unwrap();

    let sel = Selection::new(vec![t(AAPL), t(MSFT)], d(2024, 1, 1), d(2024, 1, 31));
    let snap = dash.snapshot(&sel).await.unwrap();

    assert_eq!(snap.table.columns(), [t(AAPL)]);
    assert_eq!(snap.table.value(d(2024, 1, 2), &t(AAPL)), Some(185.0));
    assert_eq!(
        snap.failure_for(&t(MSFT)),
        Some(&DashboardError::request_timeout("download:history"))
    );
}
