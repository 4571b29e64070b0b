//! Presentation: chart specification and delimited export.
//!
//! Pure transformations of a [`crate::core::ForecastResult`]; rendering and
//! download handling belong to the external UI layer.

mod chart;
mod export;

pub use chart::{chart_spec, ChartSpec, LineStyle, SeriesKind, SeriesSpec};
pub use export::{from_csv, to_csv, ExportRow};
