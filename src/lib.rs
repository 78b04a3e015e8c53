//! # sheetlens
//!
//! Excel workbook inspection: sheet names, shapes, columns, sample rows,
//! and column types.
//!
//! This library reads an XLSX workbook and builds a diagnostic report for
//! a human operator: every sheet's name, its dimensions, its column
//! labels, a bounded sample of rows, and the inferred data type of each
//! column. It only ever reads the source file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetlens::{inspect_file, report, ReportOptions};
//!
//! let options = ReportOptions::default();
//! let workbook_report = inspect_file("gradebook.xlsx", &options)?;
//! print!("{}", report::to_text(&workbook_report));
//! # Ok::<(), sheetlens::Error>(())
//! ```
//!
//! ## Lower-level access
//!
//! ```no_run
//! use sheetlens::xlsx::WorkbookReader;
//!
//! let reader = WorkbookReader::open("gradebook.xlsx")?;
//! for name in reader.sheet_names() {
//!     let grid = reader.read_sheet(name)?;
//!     println!("{}: {} rows", name, grid.max_row());
//! }
//! # Ok::<(), sheetlens::Error>(())
//! ```
//!
//! ## Features
//!
//! - `frame` (default): typed-table interpretation of sheets (column
//!   labels plus dtype inference). Without it, every sheet is reported
//!   as a raw cell grid.

pub mod detect;
pub mod error;
pub mod model;
pub mod package;
pub mod report;
pub mod xlsx;

// Re-exports
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
#[cfg(feature = "frame")]
pub use model::{Dtype, Frame};
pub use model::{CellValue, SheetGrid};
pub use package::WorkbookPackage;
pub use report::{ReportOptions, SheetReport, WorkbookReport};
pub use xlsx::WorkbookReader;

use std::path::Path;

/// Open a workbook file, detecting its format first.
///
/// Legacy binary workbooks (.xls/.xlt) are recognized and refused with
/// guidance; only OOXML workbooks can be read.
pub fn open_workbook(path: impl AsRef<Path>) -> Result<WorkbookReader> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        FormatType::Xlsx => WorkbookReader::open(path),
        FormatType::LegacyXls => Err(unsupported_legacy()),
    }
}

/// Open a workbook from bytes, detecting its format first.
pub fn open_workbook_bytes(data: &[u8]) -> Result<WorkbookReader> {
    match detect_format_from_bytes(data)? {
        FormatType::Xlsx => WorkbookReader::from_bytes(data.to_vec()),
        FormatType::LegacyXls => Err(unsupported_legacy()),
    }
}

/// Inspect a workbook file and build its report.
///
/// # Example
///
/// ```no_run
/// use sheetlens::{inspect_file, ReportOptions};
///
/// let report = inspect_file("gradebook.xlsx", &ReportOptions::default())?;
/// println!("{} sheets", report.sheet_names.len());
/// # Ok::<(), sheetlens::Error>(())
/// ```
pub fn inspect_file(path: impl AsRef<Path>, options: &ReportOptions) -> Result<WorkbookReport> {
    let reader = open_workbook(path)?;
    WorkbookReport::build(&reader, options)
}

/// Inspect a workbook from bytes and build its report.
pub fn inspect_bytes(data: &[u8], options: &ReportOptions) -> Result<WorkbookReport> {
    let reader = open_workbook_bytes(data)?;
    WorkbookReport::build(&reader, options)
}

/// Inspect a workbook file and render the text report in one step.
pub fn report_text(path: impl AsRef<Path>) -> Result<String> {
    let workbook_report = inspect_file(path, &ReportOptions::default())?;
    Ok(report::to_text(&workbook_report))
}

fn unsupported_legacy() -> Error {
    Error::UnsupportedFormat(
        "legacy binary workbook (.xls/.xlt); convert it to .xlsx first".to_string(),
    )
}
