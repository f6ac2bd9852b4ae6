//! Data module - CSV loading, cleaning and derived metrics

mod cleaner;
mod loader;
mod metrics;
pub mod model;

pub use cleaner::{DataCleaner, PipelineError};
pub use loader::{CachedTableSource, CsvTableSource, TableSource};
pub use metrics::MetricDeriver;
pub use model::{PlayerRecord, PlayerTable};
