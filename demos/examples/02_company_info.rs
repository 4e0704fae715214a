use stockdash::Ticker;
use stockdash_demos::common::{fmt_num, fmt_pct, get_dashboard};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dash = get_dashboard()?;

    // The detail panel fails on its own; other tickers still render.
    for sym in ["AAPL", "TSLA", "NOSUCHTICKER"] {
        let ticker = Ticker::new(sym)?;
        match dash.company_info(&ticker).await {
            Ok(lookup) => {
                let info = &lookup.info;
                println!("\n## {}", info.name.as_deref().unwrap_or(sym));
                println!("Sector:          {}", info.sector.as_deref().unwrap_or("N/A"));
                println!("Industry:        {}", info.industry.as_deref().unwrap_or("N/A"));
                println!("Market Cap:      {}", fmt_num(info.market_cap));
                println!("P/E Ratio:       {}", fmt_num(info.trailing_pe));
                println!("Dividend Yield:  {}", fmt_pct(info.dividend_yield_pct()));
                println!("52W High:        {}", fmt_num(info.fifty_two_week_high));
                println!("52W Low:         {}", fmt_num(info.fifty_two_week_low));
                println!(
                    "Avg Volume:      {}",
                    info.average_volume
                        .map_or_else(|| "N/A".to_string(), |v| v.to_string())
                );
                if let Some(summary) = &info.summary {
                    println!("\n{summary}");
                }
            }
            Err(e) => println!("\n## {sym}\n{e}"),
        }
    }

    Ok(())
}
