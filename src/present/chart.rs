//! Chart specification for the external UI framework.

use crate::core::{ForecastResult, TimeSeriesPoint};
use chrono::NaiveDate;
use serde::Serialize;

/// Which series a trace belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Historical,
    Forecast,
}

/// Visual treatment of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// One renderable trace on the shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: String,
    pub kind: SeriesKind,
    pub line: LineStyle,
    pub points: Vec<TimeSeriesPoint>,
}

/// A declarative two-series chart: historical (solid) and forecast (dashed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    /// Date where the forecast takes over, for a vertical marker.
    pub forecast_start: NaiveDate,
    pub series: Vec<SeriesSpec>,
}

/// Build the chart specification for a forecast result.
///
/// The forecast trace repeats the last historical point so the two lines
/// connect visually.
pub fn chart_spec(result: &ForecastResult, value_label: &str) -> ChartSpec {
    let last = result.historical().last();

    let mut forecast_points = Vec::with_capacity(result.horizon() + 1);
    forecast_points.push(last);
    forecast_points.extend_from_slice(result.forecast());

    ChartSpec {
        title: format!("{value_label} — Historical vs Forecast"),
        y_label: value_label.to_string(),
        forecast_start: last.date,
        series: vec![
            SeriesSpec {
                name: "Historical".to_string(),
                kind: SeriesKind::Historical,
                line: LineStyle::Solid,
                points: result.historical().points().to_vec(),
            },
            SeriesSpec {
                name: "Forecast".to_string(),
                kind: SeriesKind::Forecast,
                line: LineStyle::Dashed,
                points: forecast_points,
            },
        ],
    }
}
