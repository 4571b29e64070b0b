//! Exponential smoothing models behind the forecast engine.

mod damped_trend;
mod seasonal;
mod traits;

pub use damped_trend::DampedTrend;
pub use seasonal::SeasonalDampedTrend;
pub use traits::SmoothingModel;
