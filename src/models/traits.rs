//! Common interface for the smoothing models.

use crate::error::ForecastError;

/// A smoothing model that fits a value series and projects it forward.
///
/// Object-safe; the engine holds models as `&mut dyn SmoothingModel` when
/// walking its fallback chain.
pub trait SmoothingModel {
    /// Fit the model to the observed values.
    fn fit(&mut self, values: &[f64]) -> Result<(), ForecastError>;

    /// Project `horizon` steps past the end of the fitted data.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>, ForecastError>;

    /// In-sample one-step-ahead predictions.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals (actual minus fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Display name of the model.
    fn name(&self) -> &'static str;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}
