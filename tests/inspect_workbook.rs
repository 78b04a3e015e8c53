//! End-to-end inspection tests over synthesized workbook packages.
//!
//! Fixtures are built in memory as OOXML ZIP packages, so the tests run
//! without any checked-in binary files.

use sheetlens::report::{self, SheetReport};
use sheetlens::{inspect_bytes, inspect_file, Error, ReportOptions};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

/// Build an in-memory XLSX package from (sheet name, worksheet XML) pairs.
fn build_workbook(sheets: &[(&str, &str)]) -> Vec<u8> {
    build_workbook_with(sheets, None, None)
}

fn build_workbook_with(
    sheets: &[(&str, &str)],
    shared_strings: Option<&str>,
    styles: Option<&str>,
) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();

    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>"#,
    );
    let mut workbook_rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        let n = i + 1;
        workbook.push_str(&format!(
            "\n    <sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
            name, n, n
        ));
        workbook_rels.push_str(&format!(
            "\n  <Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
            n, n
        ));
    }
    workbook.push_str("\n  </sheets>\n</workbook>");
    workbook_rels.push_str("\n</Relationships>");

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(workbook.as_bytes()).unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(workbook_rels.as_bytes()).unwrap();

    for (i, (_, sheet_xml)) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(sheet_xml.as_bytes()).unwrap();
    }

    if let Some(sst) = shared_strings {
        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(sst.as_bytes()).unwrap();
    }
    if let Some(styles_xml) = styles {
        zip.start_file("xl/styles.xml", options).unwrap();
        zip.write_all(styles_xml.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// A worksheet whose first row holds inline-string headers and whose data
/// rows hold numbers.
fn numeric_sheet(headers: &[&str], data_rows: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">"#,
    );
    for (i, header) in headers.iter().enumerate() {
        xml.push_str(&format!(
            "<c r=\"{}1\" t=\"inlineStr\"><is><t>{}</t></is></c>",
            column_letter(i),
            header
        ));
    }
    xml.push_str("</row>");
    for row in 0..data_rows {
        let row_num = row + 2;
        xml.push_str(&format!("\n    <row r=\"{}\">", row_num));
        for col in 0..headers.len() {
            xml.push_str(&format!(
                "<c r=\"{}{}\"><v>{}</v></c>",
                column_letter(col),
                row_num,
                row * headers.len() + col
            ));
        }
        xml.push_str("</row>");
    }
    xml.push_str("\n  </sheetData>\n</worksheet>");
    xml
}

fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

#[test]
fn one_banner_per_sheet_in_workbook_order() {
    let data = build_workbook(&[
        ("Grades", &numeric_sheet(&["Student", "Quiz"], 3)),
        ("Roster", &numeric_sheet(&["Name"], 2)),
    ]);

    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();
    assert_eq!(report.sheet_names, ["Grades", "Roster"]);
    assert_eq!(report.sheets.len(), 2);
    assert_eq!(report.sheets[0].name(), "Grades");
    assert_eq!(report.sheets[1].name(), "Roster");

    let text = report::to_text(&report);
    assert!(text.starts_with("Sheet names: [\"Grades\", \"Roster\"]\n"));
    assert_eq!(text.matches("Sheet: ").count(), 2);
    let grades_at = text.find("Sheet: Grades").unwrap();
    let roster_at = text.find("Sheet: Roster").unwrap();
    assert!(grades_at < roster_at);
}

#[cfg(feature = "frame")]
#[test]
fn sample_rows_are_capped_at_ten() {
    let data = build_workbook(&[("Big", &numeric_sheet(&["N"], 15))]);
    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();

    match &report.sheets[0] {
        SheetReport::Table(table) => {
            assert_eq!(table.shape, (15, 1));
            assert_eq!(table.rows.len(), 10);
            assert_eq!(table.total_rows, 15);
        }
        SheetReport::Grid(_) => panic!("expected table view"),
    }

    let text = report::to_text(&report);
    assert!(text.contains("First 10 rows:"));
    assert!(text.contains("... 5 more rows"));
}

#[cfg(feature = "frame")]
#[test]
fn small_sheets_print_every_row_and_no_more() {
    let data = build_workbook(&[("Small", &numeric_sheet(&["N"], 3))]);
    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();

    match &report.sheets[0] {
        SheetReport::Table(table) => {
            assert_eq!(table.rows.len(), 3);
            assert_eq!(table.total_rows, 3);
        }
        SheetReport::Grid(_) => panic!("expected table view"),
    }

    let text = report::to_text(&report);
    assert!(text.contains("First 3 rows:"));
    assert!(!text.contains("more rows"));
}

#[cfg(feature = "frame")]
#[test]
fn column_labels_keep_source_order_and_positions() {
    // Header B1 is absent; data row 2 is sparse (A2 and C2 only).
    let sheet = r#"<?xml version="1.0"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">
      <c r="A1" t="inlineStr"><is><t>Name</t></is></c>
      <c r="C1" t="inlineStr"><is><t>Score</t></is></c>
    </row>
    <row r="2">
      <c r="A2" t="inlineStr"><is><t>Ann</t></is></c>
      <c r="C2"><v>9</v></c>
    </row>
  </sheetData>
</worksheet>"#;
    let data = build_workbook(&[("S", sheet)]);
    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();

    match &report.sheets[0] {
        SheetReport::Table(table) => {
            assert_eq!(table.columns, ["Name", "column_1", "Score"]);
            assert_eq!(table.rows[0], ["Ann", "", "9"]);
        }
        SheetReport::Grid(_) => panic!("expected table view"),
    }
}

#[cfg(feature = "frame")]
#[test]
fn dtypes_are_inferred_per_column() {
    let styles = r#"<?xml version="1.0"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="14"/></cellXfs>
</styleSheet>"#;
    let sheet = r#"<?xml version="1.0"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">
      <c r="A1" t="inlineStr"><is><t>Count</t></is></c>
      <c r="B1" t="inlineStr"><is><t>Ratio</t></is></c>
      <c r="C1" t="inlineStr"><is><t>Passed</t></is></c>
      <c r="D1" t="inlineStr"><is><t>Due</t></is></c>
      <c r="E1" t="inlineStr"><is><t>Note</t></is></c>
    </row>
    <row r="2">
      <c r="A2"><v>4</v></c>
      <c r="B2"><v>0.5</v></c>
      <c r="C2" t="b"><v>1</v></c>
      <c r="D2" s="1"><v>44197</v></c>
      <c r="E2" t="inlineStr"><is><t>ok</t></is></c>
    </row>
    <row r="3">
      <c r="A3"><v>7</v></c>
      <c r="B3"><v>1.25</v></c>
      <c r="C3" t="b"><v>0</v></c>
      <c r="D3" s="1"><v>44198</v></c>
      <c r="E3"><v>12</v></c>
    </row>
  </sheetData>
</worksheet>"#;
    let data = build_workbook_with(&[("Typed", sheet)], None, Some(styles));
    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();

    match &report.sheets[0] {
        SheetReport::Table(table) => {
            assert_eq!(table.dtypes, ["int64", "float64", "bool", "datetime", "text"]);
            assert_eq!(table.rows[0][3], "2021-01-01");
        }
        SheetReport::Grid(_) => panic!("expected table view"),
    }
}

#[test]
fn shared_strings_resolve_in_cells() {
    let sst = r#"<?xml version="1.0"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
  <si><t>Header</t></si>
  <si><t>Value</t></si>
</sst>"#;
    let sheet = r#"<?xml version="1.0"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c></row>
    <row r="2"><c r="A2" t="s"><v>1</v></c></row>
  </sheetData>
</worksheet>"#;
    let data = build_workbook_with(&[("Shared", sheet)], Some(sst), None);
    let options = ReportOptions::default().with_raw(true);
    let report = inspect_bytes(&data, &options).unwrap();

    match &report.sheets[0] {
        SheetReport::Grid(grid) => {
            assert_eq!(grid.rows[0], ["Header"]);
            assert_eq!(grid.rows[1], ["Value"]);
        }
        #[cfg(feature = "frame")]
        SheetReport::Table(_) => panic!("expected grid view"),
    }
}

#[test]
fn raw_option_forces_grid_view_for_every_sheet() {
    let data = build_workbook(&[
        ("A", &numeric_sheet(&["X"], 2)),
        ("B", &numeric_sheet(&["Y"], 12)),
    ]);
    let options = ReportOptions::default().with_raw(true);
    let report = inspect_bytes(&data, &options).unwrap();

    for sheet in &report.sheets {
        assert!(matches!(sheet, SheetReport::Grid(_)));
    }

    // Header row plus data rows, capped at 10.
    match &report.sheets[1] {
        SheetReport::Grid(grid) => {
            assert_eq!(grid.max_row, 13);
            assert_eq!(grid.rows.len(), 10);
        }
        #[cfg(feature = "frame")]
        SheetReport::Table(_) => unreachable!(),
    }

    let text = report::to_text(&report);
    assert!(text.contains("Max row: 3, Max col: 1"));
    assert!(text.contains("Max row: 13, Max col: 1"));
}

#[test]
fn empty_sheet_falls_back_to_grid_view() {
    let sheet = r#"<?xml version="1.0"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData/>
</worksheet>"#;
    let data = build_workbook(&[("Empty", sheet), ("Data", &numeric_sheet(&["N"], 1))]);
    let report = inspect_bytes(&data, &ReportOptions::default()).unwrap();

    assert!(matches!(&report.sheets[0], SheetReport::Grid(g) if g.max_row == 0));
    #[cfg(feature = "frame")]
    assert!(matches!(&report.sheets[1], SheetReport::Table(_)));

    let text = report::to_text(&report);
    assert!(text.contains("Max row: 0, Max col: 0"));
}

#[test]
fn sheet_filter_selects_one_sheet_but_lists_all_names() {
    let data = build_workbook(&[
        ("Grades", &numeric_sheet(&["Q"], 1)),
        ("Roster", &numeric_sheet(&["N"], 1)),
    ]);
    let options = ReportOptions::default().with_sheet(Some("Roster".to_string()));
    let report = inspect_bytes(&data, &options).unwrap();

    assert_eq!(report.sheet_names, ["Grades", "Roster"]);
    assert_eq!(report.sheets.len(), 1);
    assert_eq!(report.sheets[0].name(), "Roster");
}

#[test]
fn unknown_sheet_filter_is_an_error() {
    let data = build_workbook(&[("Grades", &numeric_sheet(&["Q"], 1))]);
    let options = ReportOptions::default().with_sheet(Some("Missing".to_string()));
    let result = inspect_bytes(&data, &options);
    assert!(matches!(result, Err(Error::SheetNotFound(name)) if name == "Missing"));
}

#[test]
fn reader_exposes_sheets_in_workbook_order() {
    let data = build_workbook(&[
        ("Grades", &numeric_sheet(&["Q"], 2)),
        ("Roster", &numeric_sheet(&["N"], 1)),
    ]);
    let reader = sheetlens::open_workbook_bytes(&data).unwrap();

    assert_eq!(reader.sheet_count(), 2);
    assert_eq!(reader.sheet_names(), ["Grades", "Roster"]);

    let all = reader.read_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, "Grades");
    assert_eq!(all[1].0, "Roster");
    // Header plus data rows.
    assert_eq!(all[0].1.max_row(), 3);
    assert_eq!(all[0].1.row(0).unwrap()[0], sheetlens::CellValue::Text("Q".into()));
}

#[test]
fn garbage_bytes_are_an_unknown_format() {
    let result = inspect_bytes(&[0x00, 0x01, 0x02, 0x03, 0x04], &ReportOptions::default());
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn legacy_workbook_file_is_refused_with_guidance() {
    let mut data = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    data.extend_from_slice(&[0u8; 512]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradebook.xlt");
    std::fs::write(&path, &data).unwrap();

    let result = inspect_file(&path, &ReportOptions::default());
    match result {
        Err(Error::UnsupportedFormat(msg)) => assert!(msg.contains("xlsx")),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn inspect_file_reads_from_disk() {
    let data = build_workbook(&[("Grades", &numeric_sheet(&["Student", "Quiz"], 2))]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grades.xlsx");
    std::fs::write(&path, &data).unwrap();

    let text = sheetlens::report_text(&path).unwrap();
    assert!(text.contains("Sheet: Grades"));
    #[cfg(feature = "frame")]
    assert!(text.contains("Shape: (2, 2)"));
}
