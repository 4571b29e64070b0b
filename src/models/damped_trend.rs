//! Damped-trend exponential smoothing (Holt's method with damping).
//!
//! The model equations with damping parameter φ:
//! - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + φ × b_{t-1})`
//! - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × φ × b_{t-1}`
//! - Forecast: `ŷ_{t+h} = l_t + (φ + φ² + ... + φ^h) × b_t`
//!
//! Damping geometrically attenuates the slope over the horizon, which keeps
//! short-horizon financial extrapolations from running away linearly.

use crate::error::ForecastError;
use crate::models::SmoothingModel;
use crate::utils::optimization::{minimize, FitOptions};

const ALPHA_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const BETA_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const PHI_BOUNDS: (f64, f64) = (0.8, 1.0);

/// Damped-trend smoothing model with SSE-optimized parameters.
#[derive(Debug, Clone)]
pub struct DampedTrend {
    alpha: Option<f64>,
    beta: Option<f64>,
    phi: Option<f64>,
    /// Fit parameters by SSE minimization instead of using fixed ones.
    optimize: bool,
    level: Option<f64>,
    trend: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
}

impl DampedTrend {
    /// Model with automatically fitted α, β and damping φ.
    pub fn auto() -> Self {
        Self {
            alpha: None,
            beta: None,
            phi: None,
            optimize: true,
            level: None,
            trend: None,
            fitted: None,
            residuals: None,
        }
    }

    /// Model with fixed parameters, clamped to their valid ranges.
    pub fn with_params(alpha: f64, beta: f64, phi: f64) -> Self {
        Self {
            alpha: Some(alpha.clamp(ALPHA_BOUNDS.0, ALPHA_BOUNDS.1)),
            beta: Some(beta.clamp(BETA_BOUNDS.0, BETA_BOUNDS.1)),
            phi: Some(phi.clamp(PHI_BOUNDS.0, PHI_BOUNDS.1)),
            optimize: false,
            level: None,
            trend: None,
            fitted: None,
            residuals: None,
        }
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    pub fn phi(&self) -> Option<f64> {
        self.phi
    }

    pub fn level(&self) -> Option<f64> {
        self.level
    }

    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Level starts at the first value, trend at the first difference.
    fn initial_state(values: &[f64]) -> (f64, f64) {
        (values[0], values[1] - values[0])
    }

    /// One-step-ahead sum of squared errors for a parameter set.
    fn sse(values: &[f64], alpha: f64, beta: f64, phi: f64) -> f64 {
        let (mut level, mut trend) = Self::initial_state(values);
        let mut sse = 0.0;
        for &y in &values[1..] {
            let prediction = level + phi * trend;
            let error = y - prediction;
            sse += error * error;

            let level_prev = level;
            level = alpha * y + (1.0 - alpha) * (level_prev + phi * trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
        }
        sse
    }

    /// Geometric damping sum φ + φ² + ... + φ^h.
    pub(crate) fn damped_sum(phi: f64, h: usize) -> f64 {
        if (phi - 1.0).abs() < 1e-10 {
            h as f64
        } else {
            phi * (1.0 - phi.powi(h as i32)) / (1.0 - phi)
        }
    }
}

impl Default for DampedTrend {
    fn default() -> Self {
        Self::auto()
    }
}

impl SmoothingModel for DampedTrend {
    fn fit(&mut self, values: &[f64]) -> Result<(), ForecastError> {
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }

        if self.optimize {
            let point = minimize(
                |p| Self::sse(values, p[0], p[1], p[2]),
                &[0.3, 0.1, 0.98],
                &[ALPHA_BOUNDS, BETA_BOUNDS, PHI_BOUNDS],
                FitOptions::default(),
            );
            self.alpha = Some(point[0]);
            self.beta = Some(point[1]);
            self.phi = Some(point[2]);
        }

        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        let beta = self.beta.ok_or(ForecastError::FitRequired)?;
        let phi = self.phi.ok_or(ForecastError::FitRequired)?;

        let (mut level, mut trend) = Self::initial_state(values);
        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());
        fitted.push(level);
        residuals.push(0.0);

        for &y in &values[1..] {
            let prediction = level + phi * trend;
            fitted.push(prediction);
            residuals.push(y - prediction);

            let level_prev = level;
            level = alpha * y + (1.0 - alpha) * (level_prev + phi * trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
        }

        if !level.is_finite() || !trend.is_finite() {
            return Err(ForecastError::FitFailed(
                "smoothing state diverged".to_string(),
            ));
        }

        self.level = Some(level);
        self.trend = Some(trend);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>, ForecastError> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        let trend = self.trend.ok_or(ForecastError::FitRequired)?;
        let phi = self.phi.ok_or(ForecastError::FitRequired)?;

        Ok((1..=horizon)
            .map(|h| level + Self::damped_sum(phi, h) * trend)
            .collect())
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &'static str {
        "DampedTrend"
    }
}
