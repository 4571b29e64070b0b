//! Cleaned time series: the validated input to the forecast engine.

use crate::error::{PrepareError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Minimum viable number of observations for any forecast.
pub const MIN_POINTS: usize = 6;

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Inferred sampling frequency of a series.
///
/// Only monthly spacing is recognized; anything else leaves the frequency
/// unset and disables the seasonal component downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frequency {
    Monthly,
}

/// An ordered series of valid observations.
///
/// Invariants, enforced at construction: dates strictly increasing, all
/// values finite, at least [`MIN_POINTS`] observations.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSeries {
    points: Vec<TimeSeriesPoint>,
    frequency: Option<Frequency>,
}

impl CleanedSeries {
    /// Build a series, validating the invariants.
    pub fn new(
        points: Vec<TimeSeriesPoint>,
        frequency: Option<Frequency>,
    ) -> Result<Self, PrepareError> {
        let valid = points
            .windows(2)
            .all(|w| w[0].date < w[1].date)
            && points.iter().all(|p| p.value.is_finite());
        let got = if valid { points.len() } else { 0 };
        if !valid || points.len() < MIN_POINTS {
            return Err(PrepareError::InsufficientData {
                needed: MIN_POINTS,
                got,
            });
        }
        Ok(Self { points, frequency })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Last observation; the series is never empty.
    pub fn last(&self) -> TimeSeriesPoint {
        *self.points.last().expect("series is non-empty by invariant")
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }
}
