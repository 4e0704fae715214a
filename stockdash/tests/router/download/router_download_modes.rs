use std::time::Duration;

use crate::helpers::{AAPL, GOOGL, MSFT, d, dynamic, range, series, t};
use stockdash::{Dashboard, DashboardError, FetchMode};
use stockdash_mock::MockBehavior;

async fn scripted() -> (
    std::sync::Arc<dyn stockdash::MarketDataConnector>,
    stockdash_mock::DynamicMockController,
) {
    let (conn, ctl) = dynamic("c1");
    for (sym, px) in [(AAPL, 185.0), (MSFT, 370.0), (GOOGL, 140.0)] {
        ctl.set_history_behavior(
            t(sym),
            MockBehavior::Return(series(sym, &[(d(2024, 1, 2), px)])),
        )
        .await;
    }
    (conn, ctl)
}

#[tokio::test(start_paused = true)]
async fn sequential_mode_fetches_in_order_with_spacing() {
    let (conn, ctl) = scripted().await;
    let dash = Dashboard::builder()
        .with_connector(conn)
        .fetch_mode(FetchMode::Sequential)
        .request_spacing(Duration::from_millis(500))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let report = dash
        .download()
        .tickers(&[t(GOOGL), t(AAPL), t(MSFT)])
        .unwrap()
        .range(range(d(2024, 1, 1), d(2024, 1, 5)))
        .run()
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
    let arrivals: Vec<String> = ctl
        .history_requests()
        .await
        .into_iter()
        .map(|(tk, _)| tk.to_string())
        .collect();
    assert_eq!(arrivals, [GOOGL, AAPL, MSFT]);
    assert_eq!(report.series.len(), 3);
    assert!(report.failures.is_empty());
}

#[tokio::test(start_paused = true)]
async fn concurrent_mode_ignores_spacing() {
    let (conn, _ctl) = scripted().await;
    let dash = Dashboard::builder()
        .with_connector(conn)
        .request_spacing(Duration::from_millis(500))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let report = dash
        .download()
        .tickers(&[t(GOOGL), t(AAPL), t(MSFT)])
        .unwrap()
        .range(range(d(2024, 1, 1), d(2024, 1, 5)))
        .run()
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_millis(500));
    let order: Vec<&str> = report.series.iter().map(|s| s.ticker().as_str()).collect();
    assert_eq!(order, [GOOGL, AAPL, MSFT]);
}

#[tokio::test]
async fn sequential_mode_still_isolates_failures() {
    let (conn, ctl) = scripted().await;
    ctl.set_history_behavior(
        t(AAPL),
        MockBehavior::Fail(DashboardError::connector("c1", "boom")),
    )
    .await;
    let dash = Dashboard::builder()
        .with_connector(conn)
        .fetch_mode(FetchMode::Sequential)
        .build()
        .unwrap();

    let report = dash
        .download()
        .tickers(&[t(AAPL), t(MSFT)])
        .unwrap()
        .range(range(d(2024, 1, 1), d(2024, 1, 5)))
        .run()
        .await
        .unwrap();

    assert_eq!(report.series.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].ticker, t(AAPL));
}

#[tokio::test(start_paused = true)]
async fn sequential_deadline_times_out_the_tail_only() {
    let (conn, ctl) = scripted().await;
    ctl.set_history_behavior(t(MSFT), MockBehavior::Hang).await;
    let dash = Dashboard::builder()
        .with_connector(conn)
        .fetch_mode(FetchMode::Sequential)
        .provider_timeout(Duration::from_secs(60))
        .request_timeout(Duration::from_secs(1))
        .build()
        .unwrap();

    let report = dash
        .download()
        .tickers(&[t(AAPL), t(MSFT), t(GOOGL)])
        .unwrap()
        .range(range(d(2024, 1, 1), d(2024, 1, 5)))
        .run()
        .await
        .unwrap();

    let kept: Vec<&str> = report.series.iter().map(|s| s.ticker().as_str()).collect();
    assert_eq!(kept, [AAPL]);
    let timeout = DashboardError::request_timeout("download:history");
    assert_eq!(report.failure_for(&t(MSFT)), Some(&timeout));
    assert_eq!(report.failure_for(&t(GOOGL)), Some(&timeout));
}
