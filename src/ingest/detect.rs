//! Column auto-detection helpers for the UI layer.
//!
//! These propose sensible defaults for the two dropdowns; the pipeline itself
//! never depends on them, and a caller is free to override every suggestion.

use crate::ingest::mapper::{coerce_number, infer_date_format};
use crate::ingest::table::{CellValue, RawTable};

/// Header keywords that suggest a date axis.
const DATE_KEYWORDS: &[&str] = &[
    "date", "month", "period", "time", "quarter", "year", "day", "week",
];

/// Header keywords that suggest a financial value column.
const VALUE_KEYWORDS: &[&str] = &[
    "revenue", "sales", "amount", "value", "total", "price", "income", "profit", "cost",
    "expense", "payment", "balance", "sum", "money", "fee", "charge", "earning",
];

/// Share of non-empty cells that must look like dates for a column to qualify.
const DATE_RATIO: f64 = 0.8;

/// Suggest the column most likely to hold the date axis.
///
/// Keyword-named columns win over other date-like columns; purely numeric
/// columns are skipped so year numbers and IDs are not mistaken for dates.
pub fn detect_date_column(table: &RawTable) -> Option<&str> {
    let mut keyword_matches = Vec::new();
    let mut other_matches = Vec::new();

    for (idx, header) in table.headers().iter().enumerate() {
        if !column_is_datelike(table, idx) {
            continue;
        }
        let lower = header.to_lowercase();
        if DATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            keyword_matches.push(header.as_str());
        } else {
            other_matches.push(header.as_str());
        }
    }

    keyword_matches.into_iter().next().or_else(|| other_matches.into_iter().next())
}

/// All columns whose cells coerce to numbers, excluding `exclude`.
pub fn numeric_columns<'a>(table: &'a RawTable, exclude: Option<&str>) -> Vec<&'a str> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, header)| Some(header.as_str()) != exclude)
        .filter(|(idx, _)| {
            let cells: Vec<&CellValue> = table
                .rows()
                .iter()
                .map(|row| &row[*idx])
                .filter(|c| !c.is_empty())
                .collect();
            !cells.is_empty() && cells.iter().all(|c| coerce_number(c).is_some())
        })
        .map(|(_, header)| header.as_str())
        .collect()
}

/// Suggest a value column: financial keywords first, then the first numeric
/// candidate.
pub fn suggest_value_column<'a>(table: &'a RawTable, exclude: Option<&str>) -> Option<&'a str> {
    let candidates = numeric_columns(table, exclude);
    candidates
        .iter()
        .find(|header| {
            let lower = header.to_lowercase();
            VALUE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .copied()
        .or_else(|| candidates.first().copied())
}

fn column_is_datelike(table: &RawTable, idx: usize) -> bool {
    let cells: Vec<&CellValue> = table
        .rows()
        .iter()
        .map(|row| &row[idx])
        .filter(|c| !c.is_empty())
        .collect();
    if cells.is_empty() {
        return false;
    }

    // Numeric columns could be years or IDs; never treat them as dates.
    if cells.iter().all(|c| matches!(c, CellValue::Number(_))) {
        return false;
    }

    let native = cells
        .iter()
        .filter(|c| matches!(c, CellValue::Date(_)))
        .count();
    if native as f64 / cells.len() as f64 >= DATE_RATIO {
        return true;
    }

    let format = infer_date_format(cells.iter().filter_map(|c| c.as_text()));
    match format {
        Some(fmt) => {
            let parsed = cells
                .iter()
                .filter_map(|c| c.as_text())
                .filter(|s| fmt.parse(s).is_some())
                .count();
            parsed as f64 / cells.len() as f64 >= DATE_RATIO
        }
        None => false,
    }
}
