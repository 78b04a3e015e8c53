//! XLSX styles parsing for date-format classification.
//!
//! Worksheet cells carry no type marker distinguishing dates from plain
//! numbers; a numeric cell is a date only if its style's number format
//! says so. This module parses just enough of xl/styles.xml to answer
//! that question.

use std::collections::HashMap;

/// Styles information parsed from xl/styles.xml.
#[derive(Debug, Default)]
pub struct Styles {
    /// Custom number formats: numFmtId -> formatCode
    num_fmts: HashMap<u32, String>,
    /// Cell style formats: style index -> numFmtId
    cell_xfs: Vec<u32>,
}

impl Styles {
    /// Parse styles from xl/styles.xml content. Unparseable input yields
    /// the default (no date styles), never an error: styles only refine
    /// the report.
    pub fn parse(xml: &str) -> Self {
        let mut styles = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut in_num_fmts = false;
        let mut in_cell_xfs = false;

        loop {
            let event = match reader.read_event_into(&mut buf) {
                Ok(e) => e,
                Err(_) => break,
            };
            match event {
                quick_xml::events::Event::Start(ref e)
                | quick_xml::events::Event::Empty(ref e) => match e.name().as_ref() {
                    b"numFmts" => in_num_fmts = true,
                    b"cellXfs" => in_cell_xfs = true,
                    b"numFmt" if in_num_fmts => {
                        let mut id: Option<u32> = None;
                        let mut code = String::new();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"numFmtId" => {
                                    id = String::from_utf8_lossy(&attr.value).parse().ok();
                                }
                                b"formatCode" => {
                                    code = String::from_utf8_lossy(&attr.value).to_string();
                                }
                                _ => {}
                            }
                        }
                        if let Some(id) = id {
                            styles.num_fmts.insert(id, code);
                        }
                    }
                    b"xf" if in_cell_xfs => {
                        let mut num_fmt_id = 0u32;
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"numFmtId" {
                                if let Ok(id) = String::from_utf8_lossy(&attr.value).parse() {
                                    num_fmt_id = id;
                                }
                            }
                        }
                        styles.cell_xfs.push(num_fmt_id);
                    }
                    _ => {}
                },
                quick_xml::events::Event::End(ref e) => match e.name().as_ref() {
                    b"numFmts" => in_num_fmts = false,
                    b"cellXfs" => in_cell_xfs = false,
                    _ => {}
                },
                quick_xml::events::Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        styles
    }

    /// Whether the cell style at `style_index` (the cell's `s` attribute)
    /// formats its value as a date or time.
    pub fn is_date_style(&self, style_index: usize) -> bool {
        match self.cell_xfs.get(style_index) {
            Some(&id) => self.is_date_format(id),
            None => false,
        }
    }

    /// Check if a numFmtId represents a date or time format.
    pub fn is_date_format(&self, num_fmt_id: u32) -> bool {
        // Built-in ids: 14-22 dates, 45-47 times.
        if (14..=22).contains(&num_fmt_id) || (45..=47).contains(&num_fmt_id) {
            return true;
        }
        match self.num_fmts.get(&num_fmt_id) {
            Some(code) => is_date_format_code(code),
            None => false,
        }
    }
}

/// Check if a number format code renders dates or times.
///
/// Date/time codes use the letters y, m, d, h, s outside of quoted
/// literals, bracketed sections, and backslash escapes. Plain numeric
/// codes ("0.00", "#,##0", "\"$\"#,##0.00") contain none of them.
fn is_date_format_code(code: &str) -> bool {
    let mut in_bracket = false;
    let mut in_quote = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' if !in_bracket => in_quote = !in_quote,
            '[' if !in_quote => in_bracket = true,
            ']' if !in_quote => in_bracket = false,
            _ if !in_bracket && !in_quote => {
                if matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's') {
                    return true;
                }
            }
            _ => {}
        }
    }

    false
}
