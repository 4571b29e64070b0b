//! Delimited export of combined historical and forecast rows.

use crate::core::ForecastResult;
use crate::error::PipelineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One export row: `date,value,series`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub value: f64,
    pub series: String,
}

const HISTORICAL: &str = "historical";
const FORECAST: &str = "forecast";

/// Serialize the combined rows to CSV with header `date,value,series`,
/// historical rows first, dates in ISO format.
pub fn to_csv(result: &ForecastResult) -> Result<String, PipelineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for point in result.historical().points() {
        writer
            .serialize(ExportRow {
                date: point.date,
                value: point.value,
                series: HISTORICAL.to_string(),
            })
            .map_err(|e| PipelineError::Export(e.to_string()))?;
    }
    for point in result.forecast() {
        writer
            .serialize(ExportRow {
                date: point.date,
                value: point.value,
                series: FORECAST.to_string(),
            })
            .map_err(|e| PipelineError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PipelineError::Export(e.to_string()))
}

/// Parse an export back into rows. The inverse of [`to_csv`].
pub fn from_csv(text: &str) -> Result<Vec<ExportRow>, PipelineError> {
    csv::Reader::from_reader(text.as_bytes())
        .deserialize()
        .collect::<Result<Vec<ExportRow>, _>>()
        .map_err(|e| PipelineError::Export(e.to_string()))
}
