//! Core data structures shared across pipeline stages.

mod result;
mod series;

pub use result::{ForecastResult, ModelInfo};
pub use series::{CleanedSeries, Frequency, TimeSeriesPoint, MIN_POINTS};
