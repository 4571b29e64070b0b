//! Column mapping: turning user-chosen columns into (date, value) candidates.
//!
//! Individual cells that fail to coerce become `None` and are dropped later
//! by the preprocessor; a column that fails wholesale is a [`ColumnError`].

use crate::core::MIN_POINTS;
use crate::error::ColumnError;
use crate::ingest::table::{CellValue, RawTable};
use chrono::{NaiveDate, NaiveDateTime};

/// Row-aligned (date, value) candidates produced by the mapper.
pub type MappedRows = Vec<(Option<NaiveDate>, Option<f64>)>;

/// Share of non-empty cells that must coerce for a column to be accepted.
const MIN_PARSE_RATIO: f64 = 0.8;

/// How many leading cells are sampled when inferring a date format.
const FORMAT_SAMPLE: usize = 5;

/// A recognized textual date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pattern: &'static str,
    kind: FormatKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatKind {
    /// Full calendar date.
    Date,
    /// Date with a time component; the time is discarded.
    DateTime,
    /// Month granularity; resolves to the first of the month.
    Month,
}

/// Formats tried in order, most common first. US slash-format comes after
/// the day-first variant, matching how ambiguous inputs are resolved.
const DATE_FORMATS: &[DateFormat] = &[
    DateFormat { pattern: "%Y-%m-%d", kind: FormatKind::Date },
    DateFormat { pattern: "%d/%m/%Y", kind: FormatKind::Date },
    DateFormat { pattern: "%m/%d/%Y", kind: FormatKind::Date },
    DateFormat { pattern: "%d-%m-%Y", kind: FormatKind::Date },
    DateFormat { pattern: "%Y/%m/%d", kind: FormatKind::Date },
    DateFormat { pattern: "%d.%m.%Y", kind: FormatKind::Date },
    DateFormat { pattern: "%Y-%m-%d %H:%M:%S", kind: FormatKind::DateTime },
    DateFormat { pattern: "%d/%m/%Y %H:%M:%S", kind: FormatKind::DateTime },
    DateFormat { pattern: "%Y-%m", kind: FormatKind::Month },
    DateFormat { pattern: "%m/%Y", kind: FormatKind::Month },
    DateFormat { pattern: "%b %Y", kind: FormatKind::Month },
    DateFormat { pattern: "%B %Y", kind: FormatKind::Month },
    DateFormat { pattern: "%d %b %Y", kind: FormatKind::Date },
    DateFormat { pattern: "%d %B %Y", kind: FormatKind::Date },
];

impl DateFormat {
    pub(crate) fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        match self.kind {
            FormatKind::Date => NaiveDate::parse_from_str(text, self.pattern).ok(),
            FormatKind::DateTime => NaiveDateTime::parse_from_str(text, self.pattern)
                .ok()
                .map(|dt| dt.date()),
            FormatKind::Month => {
                // Pin the day so chrono has a complete date to parse.
                let padded = format!("{text} 1");
                let pattern = format!("{} %d", self.pattern);
                NaiveDate::parse_from_str(&padded, &pattern).ok()
            }
        }
    }
}

/// Infer the textual date format from a sample of cell values.
///
/// The first format that parses every sampled value wins; the same format is
/// then applied to the whole column.
pub fn infer_date_format<'a, I>(samples: I) -> Option<DateFormat>
where
    I: IntoIterator<Item = &'a str>,
{
    let sample: Vec<&str> = samples
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(FORMAT_SAMPLE)
        .collect();
    if sample.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find(|fmt| sample.iter().all(|s| fmt.parse(s).is_some()))
        .copied()
}

/// Coerce a cell to a date, using the inferred column format when available.
fn coerce_date(cell: &CellValue, format: Option<DateFormat>) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => match format {
            Some(fmt) => fmt.parse(s),
            None => DATE_FORMATS.iter().find_map(|fmt| fmt.parse(s)),
        },
        _ => None,
    }
}

/// Coerce a cell to a finite number. Textual numbers may carry thousands
/// separators or a leading currency symbol.
pub(crate) fn coerce_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) if v.is_finite() => Some(*v),
        CellValue::Text(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches(['$', '€', '£'])
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Map the chosen date and value columns onto row-aligned candidates.
///
/// Fails when either column is missing, the table is shorter than
/// [`MIN_POINTS`], or a column rejects too large a share of its cells.
pub fn map_columns(
    table: &RawTable,
    date_col: &str,
    value_col: &str,
) -> Result<MappedRows, ColumnError> {
    let date_idx = table
        .column_index(date_col)
        .ok_or_else(|| ColumnError::UnknownColumn(date_col.to_string()))?;
    let value_idx = table
        .column_index(value_col)
        .ok_or_else(|| ColumnError::UnknownColumn(value_col.to_string()))?;

    if table.len() < MIN_POINTS {
        return Err(ColumnError::TooFewRows {
            needed: MIN_POINTS,
            got: table.len(),
        });
    }

    let format = infer_date_format(
        table
            .rows()
            .iter()
            .filter_map(|row| row[date_idx].as_text()),
    );

    let mapped: MappedRows = table
        .rows()
        .iter()
        .map(|row| {
            (
                coerce_date(&row[date_idx], format),
                coerce_number(&row[value_idx]),
            )
        })
        .collect();

    if !ratio_ok(table, date_idx, &mapped, |pair| pair.0.is_some()) {
        return Err(ColumnError::UnparseableDates(date_col.to_string()));
    }
    if !ratio_ok(table, value_idx, &mapped, |pair| pair.1.is_some()) {
        return Err(ColumnError::NonNumericValues(value_col.to_string()));
    }

    tracing::debug!(
        rows = mapped.len(),
        date_column = date_col,
        value_column = value_col,
        "columns mapped"
    );
    Ok(mapped)
}

/// True when at least [`MIN_PARSE_RATIO`] of a column's non-empty cells
/// coerced successfully.
fn ratio_ok<F>(table: &RawTable, column_idx: usize, mapped: &MappedRows, coerced: F) -> bool
where
    F: Fn(&(Option<NaiveDate>, Option<f64>)) -> bool,
{
    let non_empty = table
        .rows()
        .iter()
        .filter(|row| !row[column_idx].is_empty())
        .count();
    if non_empty == 0 {
        return false;
    }
    let ok = mapped.iter().filter(|pair| coerced(pair)).count();
    (ok as f64) / (non_empty as f64) >= MIN_PARSE_RATIO
}
