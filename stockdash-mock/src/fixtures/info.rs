use stockdash_core::CompanyInfo;

pub fn by_symbol(s: &str) -> Option<CompanyInfo> {
    let (name, sector, industry, market_cap, pe, yield_, avg_volume) = match s {
        "AAPL" => (
            "Apple Inc.",
            "Technology",
            "Consumer Electronics",
            2.9e12,
            29.6,
            Some(0.0052),
            55_000_000,
        ),
        "MSFT" => (
            "Microsoft Corporation",
            "Technology",
            "Software - Infrastructure",
            2.8e12,
            36.1,
            Some(0.0073),
            22_000_000,
        ),
        "GOOGL" => (
            "Alphabet Inc.",
            "Communication Services",
            "Internet Content & Information",
            1.7e12,
            26.4,
            None,
            30_000_000,
        ),
        "TSLA" => (
            "Tesla, Inc.",
            "Consumer Cyclical",
            "Auto Manufacturers",
            7.8e11,
            71.9,
            None,
            110_000_000,
        ),
        _ => return None,
    };
    Some(CompanyInfo {
        name: Some(name.to_string()),
        sector: Some(sector.to_string()),
        industry: Some(industry.to_string()),
        market_cap: Some(market_cap),
        trailing_pe: Some(pe),
        dividend_yield: yield_,
        fifty_two_week_high: None,
        fifty_two_week_low: None,
        average_volume: Some(avg_volume),
        summary: Some(format!("{name} is a fixture company used by stockdash-mock.")),
    })
}
