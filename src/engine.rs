//! Forecast orchestration: model selection, fallback, and date projection.

use crate::core::{CleanedSeries, ForecastResult, Frequency, ModelInfo, TimeSeriesPoint};
use crate::error::ForecastError;
use crate::models::{DampedTrend, SeasonalDampedTrend, SmoothingModel};
use chrono::{Months, NaiveDate};

/// Supported forecast horizon, in periods.
pub const MIN_HORIZON: usize = 1;
pub const MAX_HORIZON: usize = 12;

/// Samples per seasonal cycle for monthly data.
const SEASONAL_PERIOD: usize = 12;

/// Two full cycles are required before the seasonal component is enabled.
const MIN_SEASONAL_POINTS: usize = 2 * SEASONAL_PERIOD;

/// Fit a smoothing model to the series and project `horizon` periods.
///
/// The trend is always additive and damped. A period-12 additive seasonal
/// component is enabled only when the series holds at least two full cycles
/// and was inferred as monthly. A failing seasonal fit degrades to the
/// trend-only model; a failing trend-only fit surfaces the underlying error.
pub fn forecast(series: &CleanedSeries, horizon: usize) -> Result<ForecastResult, ForecastError> {
    if !(MIN_HORIZON..=MAX_HORIZON).contains(&horizon) {
        return Err(ForecastError::InvalidHorizon {
            min: MIN_HORIZON,
            max: MAX_HORIZON,
            got: horizon,
        });
    }

    let values = series.values();
    let seasonal_eligible =
        series.len() >= MIN_SEASONAL_POINTS && series.frequency() == Some(Frequency::Monthly);

    let (predictions, model) = if seasonal_eligible {
        let mut seasonal = SeasonalDampedTrend::auto(SEASONAL_PERIOD);
        match fit_and_predict(&mut seasonal, &values, horizon) {
            Ok(predictions) => {
                let model = ModelInfo {
                    name: seasonal.name().to_string(),
                    damped: true,
                    seasonal_period: Some(SEASONAL_PERIOD),
                };
                (predictions, model)
            }
            Err(err) => {
                tracing::warn!(%err, "seasonal fit failed, falling back to trend-only model");
                trend_only(&values, horizon)?
            }
        }
    } else {
        trend_only(&values, horizon)?
    };

    let last_date = series.last().date;
    let points: Vec<TimeSeriesPoint> = predictions
        .into_iter()
        .enumerate()
        .map(|(i, value)| TimeSeriesPoint::new(step_date(last_date, i + 1), value))
        .collect();

    tracing::info!(
        model = %model.name,
        horizon,
        seasonal = model.seasonal_period.is_some(),
        "forecast generated"
    );
    Ok(ForecastResult::new(series.clone(), points, model))
}

fn trend_only(
    values: &[f64],
    horizon: usize,
) -> Result<(Vec<f64>, ModelInfo), ForecastError> {
    let mut model = DampedTrend::auto();
    let predictions = fit_and_predict(&mut model, values, horizon)?;
    let info = ModelInfo {
        name: model.name().to_string(),
        damped: true,
        seasonal_period: None,
    };
    Ok((predictions, info))
}

/// Fit, predict, and reject non-finite output in one step.
fn fit_and_predict(
    model: &mut dyn SmoothingModel,
    values: &[f64],
    horizon: usize,
) -> Result<Vec<f64>, ForecastError> {
    model.fit(values)?;
    let predictions = model.predict(horizon)?;
    if predictions.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::NonFinite);
    }
    Ok(predictions)
}

/// Forecast dates continue the historical sequence at the inferred spacing.
/// Monthly (and the unset default) steps use calendar month arithmetic.
fn step_date(last: NaiveDate, steps: usize) -> NaiveDate {
    last.checked_add_months(Months::new(steps as u32))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MIN_POINTS;
    use approx::assert_relative_eq;

    fn monthly_series(values: Vec<f64>) -> CleanedSeries {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                TimeSeriesPoint::new(
                    start.checked_add_months(Months::new(i as u32)).unwrap(),
                    v,
                )
            })
            .collect();
        CleanedSeries::new(points, Some(Frequency::Monthly)).unwrap()
    }

    fn linear(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100_000.0 + 5_000.0 * i as f64).collect()
    }

    #[test]
    fn horizon_bounds_are_enforced() {
        let series = monthly_series(linear(MIN_POINTS));
        assert!(matches!(
            forecast(&series, 0),
            Err(ForecastError::InvalidHorizon { got: 0, .. })
        ));
        assert!(matches!(
            forecast(&series, 13),
            Err(ForecastError::InvalidHorizon { got: 13, .. })
        ));
        assert!(forecast(&series, 1).is_ok());
        assert!(forecast(&series, 12).is_ok());
    }

    #[test]
    fn forecast_length_matches_horizon_and_dates_continue() {
        let series = monthly_series(linear(18));
        let result = forecast(&series, 5).unwrap();

        assert_eq!(result.horizon(), 5);
        let last_historical = series.last().date;
        let mut prev = last_historical;
        for point in result.forecast() {
            assert!(point.date > prev);
            prev = point.date;
        }
        assert_eq!(
            result.forecast()[0].date,
            last_historical.checked_add_months(Months::new(1)).unwrap()
        );
    }

    #[test]
    fn seasonal_component_gated_on_series_length() {
        let short = monthly_series(linear(18));
        let result = forecast(&short, 3).unwrap();
        assert_eq!(result.model().seasonal_period, None);

        let long = monthly_series(linear(30));
        let result = forecast(&long, 3).unwrap();
        assert_eq!(result.model().seasonal_period, Some(12));
        assert!(result.model().damped);
    }

    #[test]
    fn seasonal_component_gated_on_monthly_frequency() {
        // 30 points but weekly spacing: no seasonal component.
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let points = (0..30)
            .map(|i| {
                TimeSeriesPoint::new(
                    start + chrono::Duration::weeks(i),
                    100.0 + i as f64,
                )
            })
            .collect();
        let series = CleanedSeries::new(points, None).unwrap();

        let result = forecast(&series, 3).unwrap();
        assert_eq!(result.model().seasonal_period, None);
    }

    #[test]
    fn trend_continuation_tracks_linear_growth() {
        let series = monthly_series(linear(24));
        let result = forecast(&series, 3).unwrap();

        // The damped fit should continue climbing from the last value.
        let last = series.last().value;
        for point in result.forecast() {
            assert!(point.value > last * 0.95);
            assert!(point.value.is_finite());
        }
        assert!(result.forecast()[2].value > result.forecast()[0].value);
    }

    #[test]
    fn degenerate_constant_series_still_forecasts() {
        // Constant 24-month series: seasonal indices are all zero, and
        // whichever path wins must produce a flat, finite forecast.
        let series = monthly_series(vec![500.0; 24]);
        let result = forecast(&series, 6).unwrap();
        for point in result.forecast() {
            assert_relative_eq!(point.value, 500.0, epsilon = 25.0);
        }
    }

    #[test]
    fn forecast_is_idempotent() {
        let series = monthly_series(linear(30));
        let a = forecast(&series, 4).unwrap();
        let b = forecast(&series, 4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn month_end_dates_step_safely() {
        // Projecting from Jan 31 must clamp to shorter months, not skip them.
        let start = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let points = (0..8)
            .map(|i| {
                TimeSeriesPoint::new(
                    start.checked_add_months(Months::new(i)).unwrap(),
                    100.0 + f64::from(i),
                )
            })
            .collect();
        let series = CleanedSeries::new(points, Some(Frequency::Monthly)).unwrap();

        let result = forecast(&series, 2).unwrap();
        let first = result.forecast()[0].date;
        assert_eq!(first.format("%Y-%m").to_string(), "2023-09");
    }
}
