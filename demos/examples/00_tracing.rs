use stockdash::Selection;
use stockdash_demos::common::{get_dashboard, today};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,stockdash=debug,stockdash_middleware=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let dash = get_dashboard()?;
    let selection = Selection::default_for(today());

    // Second pass is served from the cache; compare the debug events.
    let _ = dash.snapshot(&selection).await?;
    let _ = dash.snapshot(&selection).await?;

    Ok(())
}
