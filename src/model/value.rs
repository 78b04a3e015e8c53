//! Cell value model.

use serde::Serialize;

/// A single cell value as read from a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// No value stored.
    Empty,
    /// Shared, inline, or formula-produced string.
    Text(String),
    /// Numeric cell.
    Number(f64),
    /// Boolean cell.
    Bool(bool),
    /// Numeric cell with a date/time style. Holds the Excel serial value:
    /// whole days since 1899-12-30, fraction = time of day.
    DateTime(f64),
    /// Error cell ("#DIV/0!", "#N/A", ...).
    Error(String),
}

impl CellValue {
    /// True for `Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Short name of the value kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "bool",
            CellValue::DateTime(_) => "datetime",
            CellValue::Error(_) => "error",
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => write!(f, "TRUE"),
            CellValue::Bool(false) => write!(f, "FALSE"),
            CellValue::DateTime(serial) => match serial_to_iso(*serial) {
                Some(iso) => write!(f, "{}", iso),
                None => write!(f, "{}", serial),
            },
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Convert an Excel serial date number to an ISO 8601 string.
///
/// Serial day 1 is 1900-01-01. Excel pretends 1900 was a leap year for
/// Lotus 1-2-3 compatibility, so serials past the fake Feb 29 are shifted
/// down by one before conversion.
pub fn serial_to_iso(serial: f64) -> Option<String> {
    if serial < 0.0 || !serial.is_finite() {
        return None;
    }

    let adjusted = if serial > 60.0 { serial - 1.0 } else { serial };
    let days = adjusted.floor() as i64;
    let (year, month, day) = days_to_ymd(days)?;

    let time_fraction = serial.fract();
    if time_fraction > 0.0001 {
        let total_seconds = (time_fraction * 86400.0).round() as u32;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        Some(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year, month, day, hours, minutes, seconds
        ))
    } else {
        Some(format!("{:04}-{:02}-{:02}", year, month, day))
    }
}

/// Convert days since 1899-12-31 (day 1 = 1900-01-01) to (year, month, day).
fn days_to_ymd(days: i64) -> Option<(i32, u32, u32)> {
    if days < 1 {
        return None;
    }

    let mut year = 1900;
    let mut remaining = days;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining <= days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }

    let month_days = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1u32;
    for &len in &month_days {
        if remaining <= len as i64 {
            break;
        }
        remaining -= len as i64;
        month += 1;
    }

    Some((year, month, remaining.max(1) as u32))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
