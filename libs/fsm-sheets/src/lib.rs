//! Spreadsheet reading for the import endpoints.
//!
//! Only the first worksheet is read. Its first row is the header row; columns
//! are looked up by a list of accepted header names compared
//! case-insensitively, so `"Tjeneste nr"` and `"tjeneste nr"` both match.

mod cell;
mod format;
mod sheet;

#[cfg(any(test, feature = "test-util"))]
pub mod fixture;

pub use cell::Cell;
pub use format::SheetFormat;
pub use sheet::{Row, Sheet, read_first_sheet, read_first_sheet_blocking};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Invalid file format. Please upload .xlsx or .xls file")]
    UnsupportedFormat,

    #[error("failed to open spreadsheet: {0}")]
    Open(String),

    #[error("workbook has no worksheets")]
    NoSheets,

    #[error("failed to read worksheet '{sheet}': {reason}")]
    Sheet { sheet: String, reason: String },

    #[error("spreadsheet reader task failed: {0}")]
    Join(String),
}
