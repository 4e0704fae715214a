use chrono::Days;
use stockdash::{ChartKind, PriceField, Selection, Ticker};
use stockdash_demos::common::{fmt_num, get_dashboard, today};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dash = get_dashboard()?;

    // Two weeks of volume on the table, candles for the chart.
    let end = today();
    let start = end.checked_sub_days(Days::new(14)).unwrap_or(end);
    let selection = Selection::new(
        vec![Ticker::new("NVDA")?, Ticker::new("AMZN")?],
        start,
        end,
    )
    .with_chart(ChartKind::Candlestick)
    .with_field(PriceField::Volume);

    let snap = dash.snapshot(&selection).await?;

    let candidates: Vec<String> = snap
        .candlestick_candidates()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("{} candidates: {}", selection.chart, candidates.join(", "));

    if let Some(series) = snap.candlestick_series(None) {
        println!("\n## {} OHLC", series.ticker());
        println!(
            "{:<10} {:>10} {:>10} {:>10} {:>10}",
            "Date", "Open", "High", "Low", "Close"
        );
        for bar in series.bars() {
            let r = bar.record;
            println!(
                "{:<10} {:>10} {:>10} {:>10} {:>10}",
                bar.date.to_string(),
                fmt_num(r.open),
                fmt_num(r.high),
                fmt_num(r.low),
                fmt_num(r.close)
            );
        }
    }

    println!("\n## {} ({})", snap.table.field(), snap.table.field().axis_label());
    for p in &snap.performance {
        println!("{:<6} {} -> {}", p.ticker, p.start_value, p.end_value);
    }

    Ok(())
}
