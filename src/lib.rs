//! # fin-forecast
//!
//! Spreadsheet-to-forecast pipeline for dated financial values.
//!
//! Ingests an xlsx workbook (or a bundled sample dataset), maps user-chosen
//! date and value columns, cleans the series, fits damped-trend exponential
//! smoothing (optionally with an additive period-12 seasonal component), and
//! produces point forecasts plus summary metrics, a chart specification, and
//! a CSV export. The UI layer consumes these plain data structures; nothing
//! here renders or serves.

pub mod core;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod prepare;
pub mod present;
pub mod summary;
pub mod utils;

mod pipeline;

pub use error::{ColumnError, ForecastError, IngestError, PipelineError, PrepareError, Result};
pub use pipeline::{run, DataSource, PipelineOutput};

pub mod prelude {
    pub use crate::core::{CleanedSeries, ForecastResult, Frequency, ModelInfo, TimeSeriesPoint};
    pub use crate::error::{PipelineError, Result};
    pub use crate::pipeline::{run, DataSource, PipelineOutput};
    pub use crate::present::{chart_spec, to_csv};
    pub use crate::summary::{summarize, SummaryMetrics};
}
