use stockdash::{DashboardError, Selection, Ticker};
use stockdash_demos::common::{fmt_num, fmt_pct, get_dashboard, today};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Dashboard over the demo connector, cached for an hour.
    let dash = get_dashboard()?;

    // 2. Default tickers plus one symbol no provider knows.
    let mut selection = Selection::default_for(today());
    selection.tickers.push(Ticker::new("NOSUCHTICKER")?);
    println!(
        "Stock dashboard {} .. {} ({})",
        selection.start, selection.end, selection.field
    );

    // 3. One full pass: fetch, align, summarize.
    let snap = match dash.snapshot(&selection).await {
        Ok(s) => s,
        Err(DashboardError::NoDataAvailable { tickers, .. }) => {
            println!("Could not retrieve data for any of the selected tickers: {tickers:?}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // 4. Headline metrics, with an inline badge for failed tickers.
    println!("\n## Current");
    for t in &selection.tickers {
        if let Some(m) = snap.current_for(t) {
            println!(
                "{:<8} {:>12} {:>10}",
                t,
                fmt_num(Some(m.latest)),
                fmt_pct(m.change_pct)
            );
        } else if let Some(e) = snap.failure_for(t) {
            println!("{t:<8} [error] {e}");
        }
    }

    // 5. Performance table in selection order.
    println!("\n## Performance");
    println!(
        "{:<8} | {:>12} | {:>12} | {:>10}",
        "Ticker", "Start", "End", "Change"
    );
    println!("{:-<9}|{:-<14}|{:-<14}|{:-<11}", "", "", "", "");
    for p in &snap.performance {
        println!(
            "{:<8} | {:>12} | {:>12} | {:>10}",
            p.ticker,
            fmt_num(Some(p.start_value)),
            fmt_num(Some(p.end_value)),
            fmt_pct(p.change_pct)
        );
    }

    // 6. Tail of the aligned table; missing cells stay visible.
    println!("\n## Last rows ({} dates total)", snap.table.row_count());
    let skip = snap.table.row_count().saturating_sub(5);
    for row in snap.table.rows().skip(skip) {
        let cells: Vec<String> = row.values.iter().map(|v| fmt_num(*v)).collect();
        println!("{} {}", row.date, cells.join("  "));
    }

    Ok(())
}
