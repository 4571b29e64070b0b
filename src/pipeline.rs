//! End-to-end pipeline: ingest → map → clean → forecast → summarize.
//!
//! One invocation owns all of its intermediate data; nothing is cached or
//! shared between runs, so concurrent callers are isolated by construction.

use crate::core::ForecastResult;
use crate::error::Result;
use crate::ingest;
use crate::summary::{summarize, SummaryMetrics};
use crate::{engine, prepare};
use std::path::Path;

/// Where the input table comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Raw bytes of an uploaded xlsx workbook.
    Workbook(Vec<u8>),
    /// The bundled sample dataset (synthesized if no file is present).
    Sample,
}

/// Everything a UI needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub result: ForecastResult,
    pub metrics: SummaryMetrics,
}

/// Run the full pipeline. A failing stage aborts before the next stage runs.
pub fn run(
    source: &DataSource,
    date_col: &str,
    value_col: &str,
    horizon: usize,
) -> Result<PipelineOutput> {
    let span = tracing::info_span!("forecast_run", date_col, value_col, horizon);
    let _guard = span.enter();

    let table = match source {
        DataSource::Workbook(bytes) => ingest::load_workbook(bytes)?,
        DataSource::Sample => ingest::load_sample(Path::new(ingest::DEFAULT_SAMPLE_PATH)),
    };
    let mapped = ingest::map_columns(&table, date_col, value_col)?;
    let series = prepare::clean(mapped)?;
    let result = engine::forecast(&series, horizon)?;
    let metrics = summarize(&result);

    Ok(PipelineOutput { result, metrics })
}
