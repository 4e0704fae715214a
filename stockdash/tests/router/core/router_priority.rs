use std::time::Duration;

use crate::helpers::{AAPL, d, dynamic, range, series, t};
use stockdash::{Dashboard, DashboardError, TimeSeries};
use stockdash_mock::MockBehavior;

#[tokio::test]
async fn first_success_wins_and_later_connectors_are_not_called() {
    let (c1, ctl1) = dynamic("c1");
    let (c2, ctl2) = dynamic("c2");
    ctl1.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 100.0)])),
    )
    .await;
    ctl2.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 999.0)])),
    )
    .await;

    let dash = Dashboard::builder()
        .with_connector(c1)
        .with_connector(c2)
        .build()
        .unwrap();
    let s = dash
        .fetch(&t(AAPL), range(d(2024, 1, 1), d(2024, 1, 3)))
        .await
        .unwrap();

    assert_eq!(s.bars()[0].record.close, Some(100.0));
    assert_eq!(ctl2.history_calls(&t(AAPL)).await, 0);
}

#[tokio::test]
async fn falls_back_on_error_and_on_empty_series() {
    let (c1, ctl1) = dynamic("c1");
    let (c2, ctl2) = dynamic("c2");
    let (c3, ctl3) = dynamic("c3");
    ctl1.set_history_behavior(
        t(AAPL),
        MockBehavior::Fail(DashboardError::connector("c1", "boom")),
    )
    .await;
    ctl2.set_history_behavior(t(AAPL), MockBehavior::Return(TimeSeries::empty(t(AAPL))))
        .await;
    ctl3.set_history_behavior(
        t(AAPL),
        MockBehavior::Return(series(AAPL, &[(d(2024, 1, 2), 42.0)])),
    )
    .await;

    let dash = Dashboard::builder()
        .with_connector(c1)
        .with_connector(c2)
        .with_connector(c3)
        .build()
        .unwrap();
    let s = dash
        .fetch(&t(AAPL), range(d(2024, 1, 1), d(2024, 1, 3)))
        .await
        .unwrap();

    assert_eq!(s.len(), 1);
    assert_eq!(ctl1.history_calls(&t(AAPL)).await, 1);
    assert_eq!(ctl2.history_calls(&t(AAPL)).await, 1);
}

#[tokio::test]
async fn all_not_found_collapses_to_single_not_found() {
    let (c1, _ctl1) = dynamic("c1");
    let (c2, ctl2) = dynamic("c2");
    ctl2.set_history_behavior(t(AAPL), MockBehavior::Return(TimeSeries::empty(t(AAPL))))
        .await;

    let dash = Dashboard::builder()
        .with_connector(c1)
        .with_connector(c2)
        .build()
        .unwrap();
    let err = dash
        .fetch(&t(AAPL), range(d(2024, 1, 1), d(2024, 1, 3)))
        .await
        .unwrap_err();

    assert_eq!(err, DashboardError::not_found("history for AAPL"));
}

#[tokio::test]
async fn mixed_failures_are_aggregated_and_tagged() {
    let (c1, ctl1) = dynamic("c1");
    let (c2, ctl2) = dynamic("c2");
    ctl1.set_history_behavior(t(AAPL), MockBehavior::Fail(DashboardError::Data("bad".into())))
        .await;
    ctl2.set_history_behavior(t(AAPL), MockBehavior::Hang).await;

    let dash = Dashboard::builder()
        .with_connector(c1)
        .with_connector(c2)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = dash
        .fetch(&t(AAPL), range(d(2024, 1, 1), d(2024, 1, 3)))
        .await
        .unwrap_err();

    match err {
        DashboardError::AllProvidersFailed(list) => {
            assert_eq!(
                list,
                vec![
                    DashboardError::connector("c1", "data issue: bad"),
                    DashboardError::provider_timeout("c2", "history"),
                ]
            );
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn single_connector_timeout_is_reported_as_provider_timeout() {
    let (c1, ctl1) = dynamic("c1");
    ctl1.set_history_behavior(t(AAPL), MockBehavior::Hang).await;

    let dash = Dashboard::builder()
        .with_connector(c1)
        .provider_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let err = dash
        .fetch(&t(AAPL), range(d(2024, 1, 1), d(2024, 1, 3)))
        .await
        .unwrap_err();

    assert_eq!(err, DashboardError::provider_timeout("c1", "history"));
    assert!(err.is_transient());
}
