//! Forecast result: historical series plus projected points and model metadata.

use crate::core::series::{CleanedSeries, TimeSeriesPoint};
use serde::Serialize;

/// Which model produced a forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    /// Display name of the fitted model.
    pub name: String,
    /// Whether the trend component is damped.
    pub damped: bool,
    /// Seasonal period if a seasonal component was fitted.
    pub seasonal_period: Option<usize>,
}

/// The immutable output of one forecast run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    historical: CleanedSeries,
    forecast: Vec<TimeSeriesPoint>,
    model: ModelInfo,
}

impl ForecastResult {
    pub(crate) fn new(
        historical: CleanedSeries,
        forecast: Vec<TimeSeriesPoint>,
        model: ModelInfo,
    ) -> Self {
        Self {
            historical,
            forecast,
            model,
        }
    }

    pub fn historical(&self) -> &CleanedSeries {
        &self.historical
    }

    pub fn forecast(&self) -> &[TimeSeriesPoint] {
        &self.forecast
    }

    /// Number of projected periods.
    pub fn horizon(&self) -> usize {
        self.forecast.len()
    }

    pub fn model(&self) -> &ModelInfo {
        &self.model
    }
}
