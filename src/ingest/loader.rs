//! Workbook loading and the bundled sample dataset.

use crate::error::IngestError;
use crate::ingest::table::{CellValue, RawTable};
use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use chrono::{Datelike, Months, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::io::Cursor;
use std::path::Path;

/// Where the optional bundled sample workbook is looked for.
pub const DEFAULT_SAMPLE_PATH: &str = "sample_financial_data.xlsx";

/// Read an xlsx workbook from raw bytes into a [`RawTable`].
///
/// The first worksheet is used; its first row supplies the column headers.
/// Blank header cells get positional names (`column_1`, ...).
pub fn load_workbook(bytes: &[u8]) -> Result<RawTable, IngestError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(IngestError::EmptySheet)?;
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell.as_string() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("column_{}", i + 1),
        })
        .collect();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    if data.is_empty() {
        return Err(IngestError::EmptySheet);
    }

    tracing::debug!(rows = data.len(), columns = headers.len(), "workbook loaded");
    Ok(RawTable::new(headers, data))
}

/// Load the bundled sample workbook, falling back to a synthesized dataset.
///
/// The fallback keeps the caller usable when no sample file ships alongside
/// the binary; it is deterministic, never an error.
pub fn load_sample(path: &Path) -> RawTable {
    match std::fs::read(path) {
        Ok(bytes) => match load_workbook(&bytes) {
            Ok(table) => return table,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "sample file unreadable, synthesizing");
            }
        },
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "sample file missing, synthesizing");
        }
    }
    sample_table()
}

/// Monthly seasonal multipliers: Q4 spike, summer dip, February trough.
const SEASONAL_FACTORS: [f64; 12] = [
    0.95, 0.92, 1.00, 1.02, 1.05, 0.98, 0.95, 0.97, 1.05, 1.10, 1.15, 1.25,
];

/// Synthesize a deterministic 24-month revenue dataset.
///
/// Base revenue of 100k with 50k of linear growth over the window, monthly
/// seasonal factors, and seeded noise of up to ±4%. Identical output on
/// every call.
pub fn sample_table() -> RawTable {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid literal date");
    let mut rng = StdRng::seed_from_u64(42);

    let rows: Vec<Vec<CellValue>> = (0..24u32)
        .map(|i| {
            let date = start
                .checked_add_months(Months::new(i))
                .expect("date within range");
            let trend = 50_000.0 * f64::from(i) / 23.0;
            let seasonal = SEASONAL_FACTORS[date.month0() as usize];
            let mut revenue = (100_000.0 + trend) * seasonal;
            revenue *= 1.0 + rng.gen_range(-0.04..0.04);
            vec![
                CellValue::Date(date),
                CellValue::Number((revenue * 100.0).round() / 100.0),
            ]
        })
        .collect();

    RawTable::new(vec!["Date".to_string(), "Revenue".to_string()], rows)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => CellValue::Date(date),
            None => CellValue::Empty,
        },
        Data::DurationIso(_) | Data::Error(_) => CellValue::Empty,
    }
}
