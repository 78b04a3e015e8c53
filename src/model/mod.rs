//! In-memory model for inspected workbooks.
//!
//! The workbook reader produces a [`SheetGrid`] of [`CellValue`]s per sheet.
//! With the `frame` feature, a grid can be interpreted as a [`Frame`]: a
//! header row of column labels plus typed data columns.

#[cfg(feature = "frame")]
mod frame;
mod grid;
mod value;

#[cfg(feature = "frame")]
pub use frame::{Dtype, Frame};
pub use grid::SheetGrid;
pub use value::CellValue;
