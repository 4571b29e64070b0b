//! Error types for the forecasting pipeline.
//!
//! Each pipeline boundary has its own error enum; `PipelineError` collects
//! them for callers that run the whole pipeline. Every error is terminal for
//! the current run; no stage is retried.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Errors raised while reading a spreadsheet into a table.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The bytes could not be opened as a workbook.
    #[error("unreadable workbook: {0}")]
    Unreadable(#[from] calamine::XlsxError),

    /// The workbook contains no worksheets.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// The first worksheet has a header row but no data rows (or nothing at all).
    #[error("worksheet is empty")]
    EmptySheet,
}

/// Errors raised while mapping user-chosen columns onto a series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnError {
    /// The named column does not exist in the table.
    #[error("column {0:?} not found in the data")]
    UnknownColumn(String),

    /// The date column could not be parsed as dates under any known format.
    #[error("column {0:?} cannot be parsed as dates")]
    UnparseableDates(String),

    /// The value column is not numeric after coercion.
    #[error("column {0:?} is not numeric")]
    NonNumericValues(String),

    /// The table has too few rows to forecast from.
    #[error("at least {needed} rows are required, got {got}")]
    TooFewRows { needed: usize, got: usize },
}

/// Errors raised while cleaning the mapped series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    /// Fewer than the minimum viable number of valid rows remain after cleaning.
    #[error("insufficient data after cleaning: need at least {needed} valid rows, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

/// Errors raised while fitting a model or projecting forward.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Horizon outside the supported range.
    #[error("horizon must be between {min} and {max}, got {got}")]
    InvalidHorizon { min: usize, max: usize, got: usize },

    /// Not enough observations for the selected model.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// The fit did not produce a usable model.
    #[error("model fit failed: {0}")]
    FitFailed(String),

    /// A forecast value came out NaN or infinite.
    #[error("forecast produced non-finite values")]
    NonFinite,
}

/// Top-level error for a full pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error(transparent)]
    Prepare(#[from] PrepareError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Export serialization failure.
    #[error("export failed: {0}")]
    Export(String),
}
