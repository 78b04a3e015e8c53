//! Human-readable report renderer.

use super::{GridReport, SheetReport, WorkbookReport};

#[cfg(feature = "frame")]
use super::TableReport;
#[cfg(feature = "frame")]
use unicode_width::UnicodeWidthStr;

const BANNER: &str =
    "============================================================";

/// Render a workbook report as the diagnostic text dump.
pub fn to_text(report: &WorkbookReport) -> String {
    let mut out = String::new();

    let names: Vec<&str> = report.sheet_names.iter().map(String::as_str).collect();
    out.push_str(&format!("Sheet names: {:?}\n", names));

    for sheet in &report.sheets {
        out.push('\n');
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!("Sheet: {}\n", sheet.name()));
        out.push_str(BANNER);
        out.push('\n');

        match sheet {
            #[cfg(feature = "frame")]
            SheetReport::Table(table) => render_table(&mut out, table),
            SheetReport::Grid(grid) => render_grid(&mut out, grid),
        }
    }

    out
}

#[cfg(feature = "frame")]
fn render_table(out: &mut String, table: &TableReport) {
    out.push_str(&format!("Shape: ({}, {})\n", table.shape.0, table.shape.1));
    out.push_str(&format!("Columns: {:?}\n", table.columns));

    out.push_str(&format!("First {} rows:\n", table.rows.len()));
    render_aligned(out, &table.columns, &table.rows);
    if table.total_rows > table.rows.len() {
        out.push_str(&format!(
            "  ... {} more rows\n",
            table.total_rows - table.rows.len()
        ));
    }

    out.push_str("Data types:\n");
    for (name, dtype) in table.columns.iter().zip(&table.dtypes) {
        out.push_str(&format!("  {}: {}\n", name, dtype));
    }
}

fn render_grid(out: &mut String, grid: &GridReport) {
    out.push_str(&format!(
        "Max row: {}, Max col: {}\n",
        grid.max_row, grid.max_col
    ));
    for row in &grid.rows {
        let items: Vec<String> = row.iter().map(|v| tuple_item(v)).collect();
        out.push_str(&format!("({})\n", items.join(", ")));
    }
    if grid.max_row > grid.rows.len() {
        out.push_str(&format!("... {} more rows\n", grid.max_row - grid.rows.len()));
    }
}

/// Render one stringified cell as a tuple element: bare if it reads as a
/// number or boolean, quoted otherwise.
fn tuple_item(value: &str) -> String {
    if value.is_empty() {
        return "None".to_string();
    }
    let bare = value.parse::<f64>().is_ok() || value == "TRUE" || value == "FALSE";
    if bare {
        value.to_string()
    } else {
        format!("{:?}", value)
    }
}

/// Write header + rows as a left-aligned column layout, widths measured
/// in display cells so CJK content lines up.
#[cfg(feature = "frame")]
fn render_aligned(out: &mut String, header: &[String], rows: &[Vec<String>]) {
    let columns = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            if cell.width() > widths[i] {
                widths[i] = cell.width();
            }
        }
    }

    let mut write_row = |cells: &[String]| {
        let mut line = String::from("  ");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            if i + 1 < columns {
                let pad = width.saturating_sub(cell.width()) + 2;
                line.push_str(&" ".repeat(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    };

    write_row(header);
    for row in rows {
        write_row(row);
    }
}
