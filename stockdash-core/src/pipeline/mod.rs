/// Date alignment of several per-ticker series into one table.
pub mod align;
/// Headline and period metrics computed from an aligned table.
pub mod metrics;
