//! Headline metrics derived from a forecast result.

use crate::core::ForecastResult;
use crate::utils::stats::mean;
use serde::Serialize;

/// Summary figures for display alongside the chart.
///
/// A pure function of [`ForecastResult`]; recomputed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub historical_average: f64,
    pub forecast_average: f64,
    /// Percentage change from the historical to the forecast average;
    /// exactly zero when the historical average is zero.
    pub growth_rate_percent: f64,
    pub historical_total: f64,
    pub forecast_total: f64,
    pub forecast_periods: usize,
}

/// Compute summary metrics. Always succeeds for a well-formed result.
pub fn summarize(result: &ForecastResult) -> SummaryMetrics {
    let historical: Vec<f64> = result.historical().values();
    let forecast: Vec<f64> = result.forecast().iter().map(|p| p.value).collect();

    let historical_average = mean(&historical);
    let forecast_average = mean(&forecast);
    let growth_rate_percent = if historical_average == 0.0 {
        0.0
    } else {
        (forecast_average - historical_average) / historical_average * 100.0
    };

    SummaryMetrics {
        historical_average,
        forecast_average,
        growth_rate_percent,
        historical_total: historical.iter().sum(),
        forecast_total: forecast.iter().sum(),
        forecast_periods: forecast.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CleanedSeries, Frequency, ModelInfo, TimeSeriesPoint};
    use approx::assert_relative_eq;
    use chrono::{Months, NaiveDate};

    fn result_with(historical: Vec<f64>, forecast: Vec<f64>) -> ForecastResult {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let points: Vec<TimeSeriesPoint> = historical
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                TimeSeriesPoint::new(
                    start.checked_add_months(Months::new(i as u32)).unwrap(),
                    v,
                )
            })
            .collect();
        let n = points.len() as u32;
        let series = CleanedSeries::new(points, Some(Frequency::Monthly)).unwrap();
        let forecast_points = forecast
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                TimeSeriesPoint::new(
                    start
                        .checked_add_months(Months::new(n + i as u32))
                        .unwrap(),
                    v,
                )
            })
            .collect();
        ForecastResult::new(
            series,
            forecast_points,
            ModelInfo {
                name: "DampedTrend".to_string(),
                damped: true,
                seasonal_period: None,
            },
        )
    }

    #[test]
    fn averages_and_growth_rate() {
        let result = result_with(vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0], vec![700.0, 800.0]);
        let metrics = summarize(&result);

        assert_relative_eq!(metrics.historical_average, 350.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.forecast_average, 750.0, epsilon = 1e-9);
        assert_relative_eq!(
            metrics.growth_rate_percent,
            (750.0 - 350.0) / 350.0 * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(metrics.historical_total, 2100.0, epsilon = 1e-9);
        assert_relative_eq!(metrics.forecast_total, 1500.0, epsilon = 1e-9);
        assert_eq!(metrics.forecast_periods, 2);
    }

    #[test]
    fn zero_historical_average_gives_zero_growth() {
        let result = result_with(
            vec![-100.0, 100.0, -200.0, 200.0, -50.0, 50.0],
            vec![10.0],
        );
        let metrics = summarize(&result);
        assert_eq!(metrics.historical_average, 0.0);
        assert_eq!(metrics.growth_rate_percent, 0.0);
    }

    #[test]
    fn growth_rate_positive_for_rising_forecast() {
        let result = result_with(vec![100.0; 6], vec![110.0, 120.0]);
        let metrics = summarize(&result);
        assert!(metrics.growth_rate_percent > 0.0);
    }
}
