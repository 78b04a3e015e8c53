//! Raw sheet grid model.

use super::CellValue;
use serde::Serialize;

/// A sheet as a dense rectangular grid of cell values.
///
/// Rows are padded with [`CellValue::Empty`] to the width of the widest
/// row, so every row holds exactly `max_col()` cells.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl SheetGrid {
    /// Build a grid from parsed rows, padding each to the widest row.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    /// Number of rows (the original's "max row").
    pub fn max_row(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (the original's "max col").
    pub fn max_col(&self) -> usize {
        self.width
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// A single row by 0-based index.
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// True when the grid holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
