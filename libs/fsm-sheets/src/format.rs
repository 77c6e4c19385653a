use std::path::Path;

/// Spreadsheet container formats accepted for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Legacy Excel (.xls, OLE compound document)
    Xls,
    /// Excel Open XML (.xlsx, ZIP container)
    Xlsx,
}

/// OLE Compound Document magic bytes (used by .xls)
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];
/// ZIP archive magic bytes (used by .xlsx)
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

impl SheetFormat {
    /// Format implied by the uploaded file name, `None` for anything but
    /// `.xlsx`/`.xls`.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.get(..4)? {
            m if m == OLE_MAGIC => Some(Self::Xls),
            m if m == ZIP_MAGIC => Some(Self::Xlsx),
            _ => None,
        }
    }
}
