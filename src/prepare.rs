//! Preprocessing: sorting, deduplication, and frequency inference.

use crate::core::{CleanedSeries, Frequency, TimeSeriesPoint, MIN_POINTS};
use crate::error::PrepareError;
use crate::ingest::MappedRows;
use chrono::NaiveDate;

/// A median inter-sample gap inside this window (in days) is taken as
/// monthly sampling.
const MONTHLY_GAP_DAYS: std::ops::RangeInclusive<i64> = 25..=35;

/// Clean mapped rows into a validated series.
///
/// Rows with a missing date or non-finite value are dropped, the rest sorted
/// ascending by date. Exact duplicate dates collapse to the later occurrence
/// in the original row order (last write wins). Fails when fewer than
/// [`MIN_POINTS`] valid rows remain.
pub fn clean(rows: MappedRows) -> Result<CleanedSeries, PrepareError> {
    let dropped_before = rows.len();
    let mut valid: Vec<(NaiveDate, f64)> = rows
        .into_iter()
        .filter_map(|(date, value)| match (date, value) {
            (Some(d), Some(v)) if v.is_finite() => Some((d, v)),
            _ => None,
        })
        .collect();

    // Stable sort keeps original row order within equal dates, so "last
    // write wins" below sees duplicates in upload order.
    valid.sort_by_key(|(date, _)| *date);

    let mut points: Vec<TimeSeriesPoint> = Vec::with_capacity(valid.len());
    for (date, value) in valid {
        match points.last_mut() {
            Some(last) if last.date == date => last.value = value,
            _ => points.push(TimeSeriesPoint::new(date, value)),
        }
    }

    if points.len() < MIN_POINTS {
        return Err(PrepareError::InsufficientData {
            needed: MIN_POINTS,
            got: points.len(),
        });
    }

    let frequency = infer_frequency(&points);
    tracing::debug!(
        kept = points.len(),
        dropped = dropped_before - points.len(),
        ?frequency,
        "series cleaned"
    );
    CleanedSeries::new(points, frequency)
}

/// Infer the sampling frequency from the median gap between observations.
///
/// Monthly data lands in the 25-35 day window regardless of month length;
/// anything else leaves the frequency unset.
fn infer_frequency(points: &[TimeSeriesPoint]) -> Option<Frequency> {
    let mut gaps: Vec<i64> = points
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days())
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_unstable();
    let median = if gaps.len() % 2 == 1 {
        gaps[gaps.len() / 2]
    } else {
        (gaps[gaps.len() / 2 - 1] + gaps[gaps.len() / 2]) / 2
    };

    MONTHLY_GAP_DAYS.contains(&median).then_some(Frequency::Monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Months};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_rows(n: u32) -> MappedRows {
        (0..n)
            .map(|i| {
                let d = date(2023, 1, 1).checked_add_months(Months::new(i)).unwrap();
                (Some(d), Some(100.0 + f64::from(i)))
            })
            .collect()
    }

    #[test]
    fn clean_sorts_and_infers_monthly() {
        let mut rows = monthly_rows(8);
        rows.reverse();
        let series = clean(rows).unwrap();
        assert_eq!(series.len(), 8);
        assert_eq!(series.frequency(), Some(Frequency::Monthly));
        assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn clean_drops_invalid_rows() {
        let mut rows = monthly_rows(7);
        rows.push((None, Some(5.0)));
        rows.push((Some(date(2024, 1, 1)), None));
        rows.push((Some(date(2024, 2, 1)), Some(f64::NAN)));
        let series = clean(rows).unwrap();
        assert_eq!(series.len(), 7);
    }

    #[test]
    fn duplicate_dates_keep_the_later_row() {
        let mut rows = monthly_rows(6);
        rows.push((Some(date(2023, 1, 1)), Some(10_084.0)));
        rows.push((Some(date(2023, 1, 1)), Some(200.0)));
        let series = clean(rows).unwrap();
        assert_eq!(series.len(), 6);
        assert_eq!(series.points()[0].value, 200.0);
    }

    #[test]
    fn too_few_valid_rows_is_an_error() {
        let rows = monthly_rows(5);
        assert_eq!(
            clean(rows),
            Err(PrepareError::InsufficientData { needed: 6, got: 5 })
        );

        // Enough raw rows, but duplicates collapse below the minimum.
        let mut rows = monthly_rows(5);
        rows.push((Some(date(2023, 5, 1)), Some(999.0)));
        assert!(clean(rows).is_err());
    }

    #[test]
    fn weekly_spacing_leaves_frequency_unset() {
        let rows: MappedRows = (0..10)
            .map(|i| {
                let d = date(2023, 1, 2) + Duration::weeks(i);
                (Some(d), Some(f64::from(i as i32)))
            })
            .collect();
        let series = clean(rows).unwrap();
        assert_eq!(series.frequency(), None);
    }

    #[test]
    fn irregular_gaps_with_monthly_median_count_as_monthly() {
        // One long gap does not defeat the median.
        let mut rows = monthly_rows(9);
        rows.remove(4);
        let series = clean(rows).unwrap();
        assert_eq!(series.frequency(), Some(Frequency::Monthly));
    }
}
