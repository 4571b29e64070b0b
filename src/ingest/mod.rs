//! Spreadsheet ingestion: workbook loading and column mapping.

pub mod detect;
mod loader;
mod mapper;
mod table;

pub use detect::{detect_date_column, numeric_columns, suggest_value_column};
pub use loader::{load_sample, load_workbook, sample_table, DEFAULT_SAMPLE_PATH};
pub use mapper::{infer_date_format, map_columns, DateFormat, MappedRows};
pub use table::{CellValue, RawTable};
