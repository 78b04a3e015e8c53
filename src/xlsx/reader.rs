//! Workbook reader: sheet enumeration and per-sheet grid parsing.

use crate::error::{Error, Result};
use crate::model::{CellValue, SheetGrid};
use crate::package::WorkbookPackage;
use std::collections::HashMap;
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::styles::Styles;

/// Sheet entry from xl/workbook.xml.
#[derive(Debug, Clone)]
struct SheetEntry {
    name: String,
    rel_id: String,
}

/// Reader for XLSX workbooks.
///
/// Opens the package once and exposes the sheet list; individual sheets
/// are parsed into [`SheetGrid`]s on demand.
pub struct WorkbookReader {
    package: WorkbookPackage,
    shared_strings: SharedStrings,
    styles: Styles,
    sheets: Vec<SheetEntry>,
    relationships: HashMap<String, String>,
}

impl WorkbookReader {
    /// Open an XLSX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_package(WorkbookPackage::open(path)?)
    }

    /// Create a reader from workbook bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_package(WorkbookPackage::from_bytes(data)?)
    }

    fn from_package(package: WorkbookPackage) -> Result<Self> {
        // Both parts are optional: small workbooks omit sharedStrings.xml,
        // and styles only refine numeric cells into dates.
        let shared_strings = match package.read_xml("xl/sharedStrings.xml") {
            Ok(xml) => SharedStrings::parse(&xml)?,
            Err(_) => SharedStrings::default(),
        };
        let styles = match package.read_xml("xl/styles.xml") {
            Ok(xml) => Styles::parse(&xml),
            Err(_) => Styles::default(),
        };

        let relationships = package.relationships("xl/workbook.xml")?;
        let sheets = parse_workbook(&package)?;

        Ok(Self {
            package,
            shared_strings,
            styles,
            sheets,
            relationships,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Read one sheet into a grid.
    pub fn read_sheet(&self, name: &str) -> Result<SheetGrid> {
        let entry = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        let part = self.sheet_part(entry)?;
        let xml = self.package.read_xml(&part)?;
        self.parse_sheet_xml(&xml)
    }

    /// Read every sheet, in workbook order.
    pub fn read_all(&self) -> Result<Vec<(String, SheetGrid)>> {
        self.sheets
            .iter()
            .map(|entry| {
                let part = self.sheet_part(entry)?;
                let xml = self.package.read_xml(&part)?;
                Ok((entry.name.clone(), self.parse_sheet_xml(&xml)?))
            })
            .collect()
    }

    /// Resolve a sheet's worksheet part path via the workbook relationships.
    fn sheet_part(&self, entry: &SheetEntry) -> Result<String> {
        let target = self
            .relationships
            .get(&entry.rel_id)
            .ok_or_else(|| Error::MissingPart(format!("relationship {}", entry.rel_id)))?;
        Ok(WorkbookPackage::resolve_target("xl/workbook.xml", target))
    }

    /// Parse one worksheet XML document into a grid.
    ///
    /// Cells are placed by their reference attribute (`r="B2"`), so gaps
    /// in sparse rows stay at the right column positions. Rows missing
    /// from the XML become empty grid rows.
    fn parse_sheet_xml(&self, xml: &str) -> Result<SheetGrid> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut rows: Vec<Vec<CellValue>> = Vec::new();
        let mut in_sheet_data = false;
        let mut current_row: Option<Vec<CellValue>> = None;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"sheetData" => in_sheet_data = true,
                    b"row" if in_sheet_data => {
                        fill_row_gap(&mut rows, e);
                        current_row = Some(Vec::new());
                    }
                    b"c" if current_row.is_some() => {
                        cell = Some(PendingCell::from_element(e));
                    }
                    b"v" | b"t" if cell.is_some() => in_value = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" if in_sheet_data => {
                        // Self-closing row: present but valueless.
                        fill_row_gap(&mut rows, e);
                        rows.push(Vec::new());
                    }
                    b"c" => {
                        // Self-closing cell: styled but valueless. Still
                        // widens the row to its column.
                        if let Some(row) = current_row.as_mut() {
                            place_cell(
                                row,
                                PendingCell::from_element(e),
                                &self.shared_strings,
                                &self.styles,
                            );
                        }
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_value {
                        if let Some(cell) = cell.as_mut() {
                            cell.value.push_str(&e.unescape().unwrap_or_default());
                            cell.has_value = true;
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"sheetData" => in_sheet_data = false,
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    b"c" => {
                        if let (Some(pending), Some(row)) = (cell.take(), current_row.as_mut()) {
                            place_cell(row, pending, &self.shared_strings, &self.styles);
                        }
                    }
                    b"v" | b"t" => in_value = false,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(SheetGrid::from_rows(rows))
    }
}

/// A cell mid-parse: attributes seen on `<c>`, value text accumulated.
struct PendingCell {
    column: Option<usize>,
    cell_type: Option<String>,
    style: Option<usize>,
    value: String,
    has_value: bool,
}

impl PendingCell {
    fn from_element(e: &quick_xml::events::BytesStart<'_>) -> Self {
        Self {
            column: attr_value(e, b"r").and_then(|r| reference_to_column(&r)),
            cell_type: attr_value(e, b"t"),
            style: attr_value(e, b"s").and_then(|s| s.parse::<usize>().ok()),
            value: String::new(),
            has_value: false,
        }
    }
}

/// Pad `rows` with empty rows up to (but not including) the row number in
/// the element's `r` attribute. Rows absent from the XML still count
/// toward the sheet's extent.
fn fill_row_gap(rows: &mut Vec<Vec<CellValue>>, e: &quick_xml::events::BytesStart<'_>) {
    if let Some(r) = attr_value(e, b"r") {
        if let Ok(row_num) = r.parse::<usize>() {
            while rows.len() + 1 < row_num {
                rows.push(Vec::new());
            }
        }
    }
}

/// Resolve a pending cell to a value and place it at its column.
fn place_cell(
    row: &mut Vec<CellValue>,
    pending: PendingCell,
    shared_strings: &SharedStrings,
    styles: &Styles,
) {
    let value = resolve_cell_value(&pending, shared_strings, styles);
    let column = pending.column.unwrap_or(row.len());
    if column >= row.len() {
        row.resize(column + 1, CellValue::Empty);
    }
    row[column] = value;
}

/// Resolve a cell's value string based on its type and style attributes.
fn resolve_cell_value(
    pending: &PendingCell,
    shared_strings: &SharedStrings,
    styles: &Styles,
) -> CellValue {
    if !pending.has_value {
        return CellValue::Empty;
    }
    let raw = pending.value.as_str();

    match pending.cell_type.as_deref() {
        Some("s") => {
            // Shared string index
            match raw.parse::<usize>() {
                Ok(idx) => CellValue::Text(shared_strings.get(idx).unwrap_or("").to_string()),
                Err(_) => CellValue::Text(raw.to_string()),
            }
        }
        Some("b") => CellValue::Bool(raw == "1"),
        Some("e") => CellValue::Error(raw.to_string()),
        Some("str") | Some("inlineStr") => CellValue::Text(raw.to_string()),
        _ => {
            // Number or general; a date style turns the serial into a datetime.
            match raw.parse::<f64>() {
                Ok(n) => {
                    let is_date = pending
                        .style
                        .map(|s| styles.is_date_style(s))
                        .unwrap_or(false);
                    if is_date {
                        CellValue::DateTime(n)
                    } else {
                        CellValue::Number(n)
                    }
                }
                Err(_) => CellValue::Text(raw.to_string()),
            }
        }
    }
}

/// Convert the column letters of an A1-style reference to a 0-based index
/// ("A1" -> 0, "B2" -> 1, "AA10" -> 26).
fn reference_to_column(reference: &str) -> Option<usize> {
    let letters: String = reference
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let mut column = 0usize;
    for c in letters.chars() {
        column = column * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Some(column - 1)
}

/// Get an attribute value from a start element.
fn attr_value(e: &quick_xml::events::BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Parse xl/workbook.xml for the ordered sheet list.
fn parse_workbook(package: &WorkbookPackage) -> Result<Vec<SheetEntry>> {
    let xml = package
        .read_xml("xl/workbook.xml")
        .map_err(|_| Error::MissingPart("xl/workbook.xml".to_string()))?;

    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(ref e))
            | Ok(quick_xml::events::Event::Start(ref e))
                if e.name().as_ref() == b"sheet" =>
            {
                let name = attr_value(e, b"name").unwrap_or_default();
                let rel_id = attr_value(e, b"r:id").unwrap_or_default();
                if !name.is_empty() && !rel_id.is_empty() {
                    sheets.push(SheetEntry { name, rel_id });
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
