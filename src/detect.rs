//! Format detection for workbook files.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE2 compound file magic bytes, the container of legacy .xls/.xlt workbooks.
const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for macro-enabled workbooks (.xlsm), same package layout.
const XLSM_CONTENT_TYPE: &str =
    "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Detected workbook format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Office Open XML workbook (.xlsx/.xlsm)
    Xlsx,
    /// Legacy binary workbook (.xls/.xlt), OLE2 container
    LegacyXls,
}

impl FormatType {
    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "Excel Workbook",
            FormatType::LegacyXls => "Legacy Excel Workbook",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the workbook format from a file path.
///
/// # Example
///
/// ```no_run
/// use sheetlens::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("gradebook.xlsx")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), sheetlens::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

/// Detect the workbook format from a byte slice.
///
/// Legacy OLE2 workbooks are recognized by their magic bytes so the caller
/// can report them as unsupported rather than unknown. ZIP input is only
/// accepted as a workbook when the package actually carries spreadsheet
/// content.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if data.len() >= 8 && data[..8] == OLE2_MAGIC {
        return Ok(FormatType::LegacyXls);
    }

    if data.len() < 4 || data[..4] != ZIP_MAGIC {
        return Err(Error::UnknownFormat);
    }

    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    // Prefer the declared content types, fall back to package layout.
    if let Ok(mut file) = archive.by_name("[Content_Types].xml") {
        let mut content = String::new();
        if file.read_to_string(&mut content).is_ok()
            && (content.contains(XLSX_CONTENT_TYPE) || content.contains(XLSM_CONTENT_TYPE))
        {
            return Ok(FormatType::Xlsx);
        }
    }

    let has_workbook = archive.file_names().any(|n| n == "xl/workbook.xml");
    if has_workbook {
        Ok(FormatType::Xlsx)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Check if data starts with the OLE2 compound-file magic bytes.
pub fn is_ole2_file(data: &[u8]) -> bool {
    data.len() >= 8 && data[..8] == OLE2_MAGIC
}
