pub mod summary;

pub use summary::SummaryMetrics;
