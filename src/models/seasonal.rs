//! Damped-trend smoothing with an additive seasonal component
//! (Holt-Winters, additive form).
//!
//! Update equations with damping parameter φ and period m:
//! - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + φ b_{t-1})`
//! - Trend: `b_t = β(l_t - l_{t-1}) + (1-β) φ b_{t-1}`
//! - Seasonal: `s_t = γ(y_t - l_t) + (1-γ) s_{t-m}`
//! - Forecast: `ŷ_{t+h} = l_t + (φ + ... + φ^h) b_t + s_{t+h-m}`
//!
//! Seasonal indices repeat with period m past the fitted window, so horizons
//! beyond one full cycle stay finite and consistent with the fitted state.

use crate::error::ForecastError;
use crate::models::damped_trend::DampedTrend;
use crate::models::SmoothingModel;
use crate::utils::optimization::{minimize, FitOptions};

const SMOOTHING_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const PHI_BOUNDS: (f64, f64) = (0.8, 1.0);

/// Additive seasonal damped-trend model. Needs two full cycles of data.
#[derive(Debug, Clone)]
pub struct SeasonalDampedTrend {
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    phi: Option<f64>,
    period: usize,
    optimize: bool,
    level: Option<f64>,
    trend: Option<f64>,
    seasonals: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    /// Fitted series length, used to phase the seasonal index at predict time.
    n: usize,
}

impl SeasonalDampedTrend {
    /// Model with automatically fitted α, β, γ and damping φ.
    pub fn auto(period: usize) -> Self {
        Self {
            alpha: None,
            beta: None,
            gamma: None,
            phi: None,
            period,
            optimize: true,
            level: None,
            trend: None,
            seasonals: None,
            fitted: None,
            residuals: None,
            n: 0,
        }
    }

    /// Model with fixed parameters, clamped to their valid ranges.
    pub fn with_params(alpha: f64, beta: f64, gamma: f64, phi: f64, period: usize) -> Self {
        Self {
            alpha: Some(alpha.clamp(SMOOTHING_BOUNDS.0, SMOOTHING_BOUNDS.1)),
            beta: Some(beta.clamp(SMOOTHING_BOUNDS.0, SMOOTHING_BOUNDS.1)),
            gamma: Some(gamma.clamp(SMOOTHING_BOUNDS.0, SMOOTHING_BOUNDS.1)),
            phi: Some(phi.clamp(PHI_BOUNDS.0, PHI_BOUNDS.1)),
            period,
            optimize: false,
            level: None,
            trend: None,
            seasonals: None,
            fitted: None,
            residuals: None,
            n: 0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn phi(&self) -> Option<f64> {
        self.phi
    }

    pub fn seasonals(&self) -> Option<&[f64]> {
        self.seasonals.as_deref()
    }

    /// Level from the first cycle's mean, trend from cycle-over-cycle
    /// differences, seasonal indices from detrended first-cycle deviations
    /// (they sum to zero by construction).
    fn initial_state(values: &[f64], period: usize) -> (f64, f64, Vec<f64>) {
        let first_cycle = &values[..period];
        let level = first_cycle.iter().sum::<f64>() / period as f64;

        let trend = (0..period)
            .map(|i| (values[period + i] - values[i]) / period as f64)
            .sum::<f64>()
            / period as f64;

        // The trend must come out of the first cycle before reading seasonal
        // deviations; a steep ramp is not a seasonal pattern.
        let detrended: Vec<f64> = first_cycle
            .iter()
            .enumerate()
            .map(|(i, y)| y - trend * i as f64)
            .collect();
        let detrended_mean = detrended.iter().sum::<f64>() / period as f64;
        let seasonals: Vec<f64> = detrended.iter().map(|y| y - detrended_mean).collect();

        (level, trend, seasonals)
    }

    fn sse(values: &[f64], alpha: f64, beta: f64, gamma: f64, phi: f64, period: usize) -> f64 {
        let (mut level, mut trend, mut seasonals) = Self::initial_state(values, period);
        let mut sse = 0.0;

        for (t, &y) in values.iter().enumerate().skip(period) {
            let idx = t % period;
            let s = seasonals[idx];
            let prediction = level + phi * trend + s;
            let error = y - prediction;
            sse += error * error;

            let level_prev = level;
            level = alpha * (y - s) + (1.0 - alpha) * (level_prev + phi * trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
            seasonals[idx] = gamma * (y - level) + (1.0 - gamma) * s;
        }

        if sse.is_finite() {
            sse
        } else {
            f64::MAX
        }
    }
}

impl SmoothingModel for SeasonalDampedTrend {
    fn fit(&mut self, values: &[f64]) -> Result<(), ForecastError> {
        if self.period < 2 {
            return Err(ForecastError::FitFailed(format!(
                "seasonal period must be at least 2, got {}",
                self.period
            )));
        }
        if values.len() < 2 * self.period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * self.period,
                got: values.len(),
            });
        }

        let period = self.period;
        if self.optimize {
            let point = minimize(
                |p| Self::sse(values, p[0], p[1], p[2], p[3], period),
                &[0.3, 0.1, 0.1, 0.98],
                &[
                    SMOOTHING_BOUNDS,
                    SMOOTHING_BOUNDS,
                    SMOOTHING_BOUNDS,
                    PHI_BOUNDS,
                ],
                FitOptions::default(),
            );
            self.alpha = Some(point[0]);
            self.beta = Some(point[1]);
            self.gamma = Some(point[2]);
            self.phi = Some(point[3]);
        }

        let alpha = self.alpha.ok_or(ForecastError::FitRequired)?;
        let beta = self.beta.ok_or(ForecastError::FitRequired)?;
        let gamma = self.gamma.ok_or(ForecastError::FitRequired)?;
        let phi = self.phi.ok_or(ForecastError::FitRequired)?;

        let (mut level, mut trend, mut seasonals) = Self::initial_state(values, period);
        let mut fitted = Vec::with_capacity(values.len());
        let mut residuals = Vec::with_capacity(values.len());

        // The first cycle seeds the state and has no one-step prediction.
        for &y in &values[..period] {
            fitted.push(y);
            residuals.push(0.0);
        }

        for (t, &y) in values.iter().enumerate().skip(period) {
            let idx = t % period;
            let s = seasonals[idx];
            let prediction = level + phi * trend + s;
            fitted.push(prediction);
            residuals.push(y - prediction);

            let level_prev = level;
            level = alpha * (y - s) + (1.0 - alpha) * (level_prev + phi * trend);
            trend = beta * (level - level_prev) + (1.0 - beta) * phi * trend;
            seasonals[idx] = gamma * (y - level) + (1.0 - gamma) * s;
        }

        if !level.is_finite() || !trend.is_finite() || seasonals.iter().any(|s| !s.is_finite()) {
            return Err(ForecastError::FitFailed(
                "smoothing state diverged".to_string(),
            ));
        }

        self.n = values.len();
        self.level = Some(level);
        self.trend = Some(trend);
        self.seasonals = Some(seasonals);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>, ForecastError> {
        let level = self.level.ok_or(ForecastError::FitRequired)?;
        let trend = self.trend.ok_or(ForecastError::FitRequired)?;
        let phi = self.phi.ok_or(ForecastError::FitRequired)?;
        let seasonals = self.seasonals.as_ref().ok_or(ForecastError::FitRequired)?;

        Ok((1..=horizon)
            .map(|h| {
                let idx = (self.n + h - 1) % self.period;
                level + DampedTrend::damped_sum(phi, h) * trend + seasonals[idx]
            })
            .collect())
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &'static str {
        "SeasonalDampedTrend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Linear trend plus a clean period-4 additive pattern.
    fn seasonal_values(cycles: usize) -> Vec<f64> {
        let pattern = [5.0, -2.0, -5.0, 2.0];
        (0..cycles * 4)
            .map(|i| 50.0 + 1.0 * i as f64 + pattern[i % 4])
            .collect()
    }

    #[test]
    fn fits_and_predicts_seasonal_pattern() {
        let values = seasonal_values(6);
        let mut model = SeasonalDampedTrend::auto(4);
        model.fit(&values).unwrap();

        let forecast = model.predict(8).unwrap();
        assert_eq!(forecast.len(), 8);
        assert!(forecast.iter().all(|v| v.is_finite()));

        // Peaks recur with the period: step h and h+4 share the phase.
        let seasonal_gap = (forecast[4] - forecast[0]) - (forecast[5] - forecast[1]);
        assert!(seasonal_gap.abs() < 3.0);
    }

    #[test]
    fn seasonal_indices_sum_to_zero_initially() {
        let values = seasonal_values(2);
        let (_, _, seasonals) = SeasonalDampedTrend::initial_state(&values, 4);
        let sum: f64 = seasonals.iter().sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_ramp_seeds_zero_seasonal_indices() {
        // A pure ramp has no seasonal pattern; the seed must not read the
        // slope as one.
        let values: Vec<f64> = (0..24).map(|i| 100_000.0 + 5_000.0 * f64::from(i)).collect();
        let (level, trend, seasonals) = SeasonalDampedTrend::initial_state(&values, 12);

        assert_relative_eq!(trend, 5_000.0, epsilon = 1e-6);
        assert!(level > 0.0);
        for s in seasonals {
            assert_relative_eq!(s, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn two_cycle_linear_ramp_forecasts_the_continuation() {
        // Exactly two cycles of linear growth: the fitted model must keep
        // climbing instead of replaying the first cycle as seasonality.
        let values: Vec<f64> = (0..24).map(|i| 100_000.0 + 5_000.0 * f64::from(i)).collect();
        let mut model = SeasonalDampedTrend::auto(12);
        model.fit(&values).unwrap();

        let forecast = model.predict(3).unwrap();
        let average = forecast.iter().sum::<f64>() / 3.0;
        // Continuing the line gives 220k, 225k, 230k.
        assert_relative_eq!(average, 225_000.0, max_relative = 0.05);
        assert!(forecast.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn needs_two_full_cycles() {
        let values = seasonal_values(2);
        let mut model = SeasonalDampedTrend::auto(4);
        assert!(model.fit(&values[..7]).is_err());
        assert!(model.fit(&values).is_ok());
    }

    #[test]
    fn rejects_degenerate_period() {
        let mut model = SeasonalDampedTrend::auto(1);
        assert!(matches!(
            model.fit(&[1.0, 2.0, 3.0]),
            Err(ForecastError::FitFailed(_))
        ));
    }

    #[test]
    fn predict_before_fit_is_rejected() {
        let model = SeasonalDampedTrend::auto(12);
        assert_eq!(model.predict(3), Err(ForecastError::FitRequired));
    }

    #[test]
    fn horizon_beyond_one_cycle_stays_finite() {
        let values = seasonal_values(6);
        let mut model = SeasonalDampedTrend::auto(4);
        model.fit(&values).unwrap();

        // Twelve steps = three full cycles past the data.
        let forecast = model.predict(12).unwrap();
        assert!(forecast.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn fit_is_deterministic() {
        let values = seasonal_values(7);
        let mut a = SeasonalDampedTrend::auto(4);
        let mut b = SeasonalDampedTrend::auto(4);
        a.fit(&values).unwrap();
        b.fit(&values).unwrap();
        assert_eq!(a.predict(5).unwrap(), b.predict(5).unwrap());
    }
}
