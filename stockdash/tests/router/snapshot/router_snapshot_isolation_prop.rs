use std::sync::Arc;

use crate::helpers::{d, t};
use proptest::prelude::*;
use stockdash::{Dashboard, DashboardError, Selection};
use stockdash_mock::MockConnector;

const POOL: [&str; 6] = ["AAPL", "MSFT", "FAIL", "GOOGL", "ZZZZ", "TSLA"];

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(fut)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn failures_never_leak_into_columns(picks in proptest::sample::subsequence(POOL.to_vec(), 1..=POOL.len())) {
        block_on(async move {
            let dash = Dashboard::builder()
                .with_connector(Arc::new(MockConnector::new()))
                .build()
                .unwrap();
            let tickers: Vec<_> = picks.iter().map(|s| t(s)).collect();
            let sel = Selection::new(tickers.clone(), d(2024, 5, 6), d(2024, 5, 10));

            let good: Vec<_> = tickers
                .iter()
                .filter(|tk| !matches!(tk.as_str(), "FAIL" | "ZZZZ"))
                .cloned()
                .collect();

            match dash.snapshot(&sel).await {
                Ok(snap) => {
                    assert_eq!(snap.table.columns(), good.as_slice());
                    assert_eq!(snap.failures.len(), tickers.len() - good.len());
                    let perf: Vec<_> = snap.performance.iter().map(|p| p.ticker.clone()).collect();
                    assert_eq!(perf, good);
                    assert_eq!(snap.table.row_count(), 5);
                }
                Err(DashboardError::NoDataAvailable { tickers: names, failures }) => {
                    assert!(good.is_empty());
                    assert_eq!(names.len(), tickers.len());
                    assert_eq!(failures.len(), tickers.len());
                }
                Err(other) => panic!("unexpected: {other:?}"),
            }
        });
    }
}
