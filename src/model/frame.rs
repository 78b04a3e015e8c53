//! Typed-table interpretation of a sheet grid.

use super::{CellValue, SheetGrid};
use crate::error::{Error, Result};
use serde::Serialize;

/// Inferred data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    /// Whole numbers only.
    Int64,
    /// At least one fractional number.
    Float64,
    /// Booleans only.
    Bool,
    /// Date/time-styled numbers only.
    DateTime,
    /// Textual, error, or mixed content.
    Text,
    /// No non-empty cells.
    Empty,
}

impl Dtype {
    /// Name as printed in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Dtype::Int64 => "int64",
            Dtype::Float64 => "float64",
            Dtype::Bool => "bool",
            Dtype::DateTime => "datetime",
            Dtype::Text => "text",
            Dtype::Empty => "empty",
        }
    }
}

impl std::fmt::Display for Dtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A sheet interpreted as a table: the first grid row becomes the column
/// labels, the remaining rows the data, with one inferred [`Dtype`] per
/// column.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    dtypes: Vec<Dtype>,
    rows: Vec<Vec<CellValue>>,
}

impl Frame {
    /// Interpret a grid as a table.
    ///
    /// Fails on a grid with no rows; callers fall back to the raw grid
    /// view for such sheets. An empty header cell at position `i` gets the
    /// positional label `column_{i}`.
    pub fn from_grid(grid: &SheetGrid) -> Result<Self> {
        let mut rows_iter = grid.rows().iter();
        let header = rows_iter
            .next()
            .ok_or_else(|| Error::InvalidData("sheet has no rows".to_string()))?;

        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if cell.is_empty() {
                    format!("column_{}", i)
                } else {
                    cell.to_string()
                }
            })
            .collect();

        let rows: Vec<Vec<CellValue>> = rows_iter.cloned().collect();

        let dtypes = (0..columns.len())
            .map(|col| infer_dtype(rows.iter().map(|row| &row[col])))
            .collect();

        Ok(Self {
            columns,
            dtypes,
            rows,
        })
    }

    /// `(data_rows, columns)`, header row excluded.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Column labels in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Inferred dtype per column, aligned with [`columns`](Self::columns).
    pub fn dtypes(&self) -> &[Dtype] {
        &self.dtypes
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// Infer the dtype of one column from its cells, ignoring empty cells.
fn infer_dtype<'a>(cells: impl Iterator<Item = &'a CellValue>) -> Dtype {
    let mut seen_int = false;
    let mut seen_float = false;
    let mut seen_bool = false;
    let mut seen_datetime = false;
    let mut seen_text = false;

    for cell in cells {
        match cell {
            CellValue::Empty => {}
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    seen_int = true;
                } else {
                    seen_float = true;
                }
            }
            CellValue::Bool(_) => seen_bool = true,
            CellValue::DateTime(_) => seen_datetime = true,
            CellValue::Text(_) | CellValue::Error(_) => seen_text = true,
        }
    }

    let numeric = seen_int || seen_float;
    match (numeric, seen_bool, seen_datetime, seen_text) {
        (false, false, false, false) => Dtype::Empty,
        (true, false, false, false) => {
            if seen_float {
                Dtype::Float64
            } else {
                Dtype::Int64
            }
        }
        (false, true, false, false) => Dtype::Bool,
        (false, false, true, false) => Dtype::DateTime,
        _ => Dtype::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<CellValue>>) -> SheetGrid {
        SheetGrid::from_rows(rows)
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_from_grid_basic() {
        let g = grid(vec![
            vec![text("Name"), text("Score")],
            vec![text("Ann"), CellValue::Number(9.0)],
            vec![text("Bob"), CellValue::Number(7.0)],
        ]);
        let frame = Frame::from_grid(&g).unwrap();
        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.columns(), ["Name", "Score"]);
        assert_eq!(frame.dtypes(), [Dtype::Text, Dtype::Int64]);
    }

    #[test]
    fn test_from_grid_empty_fails() {
        let g = grid(Vec::new());
        assert!(matches!(Frame::from_grid(&g), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_header_only() {
        let g = grid(vec![vec![text("A"), text("B")]]);
        let frame = Frame::from_grid(&g).unwrap();
        assert_eq!(frame.shape(), (0, 2));
        assert_eq!(frame.dtypes(), [Dtype::Empty, Dtype::Empty]);
    }

    #[test]
    fn test_unnamed_columns() {
        let g = grid(vec![
            vec![text("Name"), CellValue::Empty, text("Score")],
            vec![text("Ann"), text("x"), CellValue::Number(1.0)],
        ]);
        let frame = Frame::from_grid(&g).unwrap();
        assert_eq!(frame.columns(), ["Name", "column_1", "Score"]);
    }

    #[test]
    fn test_infer_int_vs_float() {
        assert_eq!(
            infer_dtype([CellValue::Number(1.0), CellValue::Number(2.0)].iter()),
            Dtype::Int64
        );
        assert_eq!(
            infer_dtype([CellValue::Number(1.0), CellValue::Number(2.5)].iter()),
            Dtype::Float64
        );
    }

    #[test]
    fn test_infer_ignores_empty_cells() {
        assert_eq!(
            infer_dtype([CellValue::Number(1.0), CellValue::Empty].iter()),
            Dtype::Int64
        );
        assert_eq!(
            infer_dtype([CellValue::Empty, CellValue::Empty].iter()),
            Dtype::Empty
        );
    }

    #[test]
    fn test_infer_mixed_is_text() {
        assert_eq!(
            infer_dtype([CellValue::Number(1.0), text("x")].iter()),
            Dtype::Text
        );
        assert_eq!(
            infer_dtype([CellValue::Bool(true), CellValue::Number(1.0)].iter()),
            Dtype::Text
        );
    }

    #[test]
    fn test_infer_bool_and_datetime() {
        assert_eq!(
            infer_dtype([CellValue::Bool(true), CellValue::Bool(false)].iter()),
            Dtype::Bool
        );
        assert_eq!(
            infer_dtype([CellValue::DateTime(44197.0)].iter()),
            Dtype::DateTime
        );
    }

    #[test]
    fn test_infer_error_cells_are_text() {
        assert_eq!(
            infer_dtype([CellValue::Error("#DIV/0!".into())].iter()),
            Dtype::Text
        );
    }
}
