pub mod aggregator;
pub mod summary;

pub use aggregator::{aggregate, aggregate_with_summary, Ingest, Rollup};
pub use summary::RollupSummary;
