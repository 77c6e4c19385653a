//! Minimal `.xlsx` writer for import tests.
//!
//! Produces a single-sheet workbook with inline strings, which calamine reads
//! the same way as a workbook saved by a spreadsheet application.

use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// One cell value in a fixture row.
#[derive(Debug, Clone, PartialEq)]
pub enum XlsxValue {
    Blank,
    Text(String),
    Number(f64),
}

impl XlsxValue {
    #[must_use]
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_owned())
    }

    #[must_use]
    pub fn num(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for XlsxValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<f64> for XlsxValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        let rem = u8::try_from(index % 26).unwrap_or(0);
        name.push(b'A' + rem);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn cell_xml(cref: &str, value: &XlsxValue) -> Option<String> {
    match value {
        XlsxValue::Blank => None,
        XlsxValue::Text(s) => Some(format!(
            r#"<c r="{cref}" t="inlineStr"><is><t>{}</t></is></c>"#,
            escape(s)
        )),
        XlsxValue::Number(n) => Some(format!(r#"<c r="{cref}"><v>{n}</v></c>"#)),
    }
}

fn sheet_xml(rows: &[Vec<XlsxValue>]) -> String {
    let body: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let rn = r + 1;
            let cells: String = row
                .iter()
                .enumerate()
                .filter_map(|(c, v)| cell_xml(&format!("{}{rn}", column_name(c)), v))
                .collect();
            format!(r#"<row r="{rn}">{cells}</row>"#)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        body.concat()
    )
}

fn try_build(rows: &[Vec<XlsxValue>]) -> zip::result::ZipResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = SimpleFileOptions::default();
    let sheet = sheet_xml(rows);
    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, opts)?;
        zip.write_all(body.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Build a one-sheet workbook; the first row is the header row.
///
/// # Panics
/// Only if writing to an in-memory buffer fails.
#[must_use]
#[allow(clippy::expect_used)]
pub fn build_xlsx(rows: &[Vec<XlsxValue>]) -> Vec<u8> {
    try_build(rows).expect("in-memory xlsx")
}
