//! XLSX (Excel) workbook reading.
//!
//! This module reads workbooks in the Office Open XML (.xlsx) format into
//! per-sheet cell grids.
//!
//! # Example
//!
//! ```no_run
//! use sheetlens::xlsx::WorkbookReader;
//!
//! let reader = WorkbookReader::open("gradebook.xlsx")?;
//! for name in reader.sheet_names() {
//!     let grid = reader.read_sheet(name)?;
//!     println!("{}: {} rows x {} cols", name, grid.max_row(), grid.max_col());
//! }
//! # Ok::<(), sheetlens::Error>(())
//! ```

mod reader;
mod shared_strings;
mod styles;

pub use reader::WorkbookReader;
pub use shared_strings::SharedStrings;
pub use styles::Styles;
