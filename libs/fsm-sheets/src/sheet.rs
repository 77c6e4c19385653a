use std::io::Cursor;

use calamine::{Data, Range, Reader, Xls, Xlsx};

use crate::{Cell, SheetError, SheetFormat};

static EMPTY_CELL: Cell = Cell::Empty;

/// First worksheet of a workbook: header row plus data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// One data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    cells: &'a [Cell],
}

fn normalize_header(h: &str) -> String {
    h.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Sheet {
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the first column whose header equals any of `names`,
    /// ignoring case and surrounding/repeated whitespace.
    #[must_use]
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        let wanted: Vec<String> = names.iter().map(|n| normalize_header(n)).collect();
        self.headers
            .iter()
            .position(|h| wanted.contains(&normalize_header(h)))
    }

    /// Data rows, skipping rows where every cell is empty.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .filter(|r| r.iter().any(|c| c.text().is_some()))
            .map(|cells| Row { cells })
    }
}

impl<'a> Row<'a> {
    /// Cell at `col`; a missing column reads as empty.
    #[must_use]
    pub fn cell(&self, col: Option<usize>) -> &'a Cell {
        col.and_then(|i| self.cells.get(i)).unwrap_or(&EMPTY_CELL)
    }

    #[must_use]
    pub fn text(&self, col: Option<usize>) -> Option<String> {
        self.cell(col).text()
    }

    #[must_use]
    pub fn int_text(&self, col: Option<usize>) -> Option<String> {
        self.cell(col).int_text()
    }

    #[must_use]
    pub fn number(&self, col: Option<usize>) -> Option<f64> {
        self.cell(col).number()
    }
}

fn range_to_sheet(range: &Range<Data>) -> Sheet {
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|r| {
            r.iter()
                .map(|c| Cell::from(c).text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows.map(|r| r.iter().map(Cell::from).collect()).collect();
    Sheet { headers, rows }
}

fn first_sheet<RS, R>(workbook: &mut R) -> Result<Sheet, SheetError>
where
    RS: std::io::Read + std::io::Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or(SheetError::NoSheets)?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| SheetError::Sheet {
            sheet: name.clone(),
            reason: e.to_string(),
        })?;
    tracing::debug!(sheet = %name, height = range.height(), width = range.width(), "worksheet loaded");
    Ok(range_to_sheet(&range))
}

/// Decode the first worksheet of an `.xlsx` or `.xls` workbook.
///
/// # Errors
/// `UnsupportedFormat` if the bytes are neither container format, `Open` or
/// `Sheet` if the workbook is damaged.
pub fn read_first_sheet_blocking(bytes: &[u8]) -> Result<Sheet, SheetError> {
    match SheetFormat::from_magic_bytes(bytes).ok_or(SheetError::UnsupportedFormat)? {
        SheetFormat::Xlsx => {
            let mut wb: Xlsx<_> =
                Xlsx::new(Cursor::new(bytes)).map_err(|e| SheetError::Open(e.to_string()))?;
            first_sheet(&mut wb)
        }
        SheetFormat::Xls => {
            let mut wb: Xls<_> =
                Xls::new(Cursor::new(bytes)).map_err(|e| SheetError::Open(e.to_string()))?;
            first_sheet(&mut wb)
        }
    }
}

/// [`read_first_sheet_blocking`] on the blocking thread pool.
///
/// # Errors
/// Same as [`read_first_sheet_blocking`], plus `Join` if the worker panicked.
pub async fn read_first_sheet(bytes: Vec<u8>) -> Result<Sheet, SheetError> {
    tokio::task::spawn_blocking(move || read_first_sheet_blocking(&bytes))
        .await
        .map_err(|e| SheetError::Join(e.to_string()))?
}
