//! Inspection report: model, construction, and renderers.
//!
//! [`WorkbookReport::build`] walks the workbook's sheets and produces one
//! [`SheetReport`] each: the typed table view when a sheet can be framed
//! (feature `frame`, not forced raw), otherwise the raw grid view. The
//! renderers in [`text`] and [`json`] consume the finished report.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_text;

#[cfg(feature = "frame")]
use crate::model::Frame;
use crate::model::{CellValue, SheetGrid};
use crate::error::Result;
use crate::xlsx::WorkbookReader;
use serde::Serialize;

/// Options controlling report construction.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Maximum number of sample rows per sheet.
    pub sample_rows: usize,
    /// Skip table interpretation and always use the raw grid view.
    pub raw: bool,
    /// Restrict the report to one sheet by name.
    pub sheet: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sample_rows: 10,
            raw: false,
            sheet: None,
        }
    }
}

impl ReportOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample row cap.
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    /// Force the raw grid view.
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Restrict the report to one sheet.
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }
}

/// Report for a whole workbook.
#[derive(Debug, Serialize)]
pub struct WorkbookReport {
    /// Every sheet name in workbook order, regardless of any sheet filter.
    pub sheet_names: Vec<String>,
    /// Per-sheet reports, in workbook order.
    pub sheets: Vec<SheetReport>,
}

/// Report for one sheet, from whichever view produced it.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum SheetReport {
    /// Typed table view: shape, column labels, dtypes.
    #[cfg(feature = "frame")]
    Table(TableReport),
    /// Raw grid view: extents and row tuples.
    Grid(GridReport),
}

impl SheetReport {
    /// The sheet's name.
    pub fn name(&self) -> &str {
        match self {
            #[cfg(feature = "frame")]
            SheetReport::Table(t) => &t.name,
            SheetReport::Grid(g) => &g.name,
        }
    }
}

/// The typed table view of a sheet.
#[cfg(feature = "frame")]
#[derive(Debug, Serialize)]
pub struct TableReport {
    /// Sheet name.
    pub name: String,
    /// `(data_rows, columns)`, header row excluded.
    pub shape: (usize, usize),
    /// Column labels in source order.
    pub columns: Vec<String>,
    /// Dtype name per column, aligned with `columns`.
    pub dtypes: Vec<String>,
    /// Sample rows, already stringified for display.
    pub rows: Vec<Vec<String>>,
    /// Total data row count before sampling.
    pub total_rows: usize,
}

/// The raw grid view of a sheet.
#[derive(Debug, Serialize)]
pub struct GridReport {
    /// Sheet name.
    pub name: String,
    /// Row count of the grid.
    pub max_row: usize,
    /// Column count of the grid.
    pub max_col: usize,
    /// Sample rows, already stringified for display.
    pub rows: Vec<Vec<String>>,
}

impl WorkbookReport {
    /// Build a report over every sheet of the workbook (or the one named
    /// in the options).
    pub fn build(reader: &WorkbookReader, options: &ReportOptions) -> Result<Self> {
        let sheet_names: Vec<String> =
            reader.sheet_names().into_iter().map(String::from).collect();

        if let Some(wanted) = &options.sheet {
            if !sheet_names.iter().any(|n| n == wanted) {
                return Err(crate::error::Error::SheetNotFound(wanted.clone()));
            }
        }

        let mut sheets = Vec::new();
        for name in &sheet_names {
            if let Some(wanted) = &options.sheet {
                if name != wanted {
                    continue;
                }
            }
            let grid = reader.read_sheet(name)?;
            sheets.push(build_sheet(name, &grid, options));
        }

        Ok(Self {
            sheet_names,
            sheets,
        })
    }
}

/// Build the report for one sheet, preferring the table view.
fn build_sheet(name: &str, grid: &SheetGrid, options: &ReportOptions) -> SheetReport {
    #[cfg(feature = "frame")]
    if !options.raw {
        if let Ok(frame) = Frame::from_grid(grid) {
            return SheetReport::Table(TableReport {
                name: name.to_string(),
                shape: frame.shape(),
                columns: frame.columns().to_vec(),
                dtypes: frame.dtypes().iter().map(|d| d.to_string()).collect(),
                rows: sample_rows(frame.rows(), options.sample_rows),
                total_rows: frame.rows().len(),
            });
        }
    }

    SheetReport::Grid(GridReport {
        name: name.to_string(),
        max_row: grid.max_row(),
        max_col: grid.max_col(),
        rows: sample_rows(grid.rows(), options.sample_rows),
    })
}

/// Stringify the first `cap` rows for display.
fn sample_rows(rows: &[Vec<CellValue>], cap: usize) -> Vec<Vec<String>> {
    rows.iter()
        .take(cap)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
