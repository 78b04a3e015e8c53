//! JSON report renderer.

use super::WorkbookReport;
use crate::error::{Error, Result};

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Render a workbook report as JSON.
pub fn to_json(report: &WorkbookReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Compact => serde_json::to_string(report),
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
    };
    result.map_err(|e| Error::Report(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{GridReport, SheetReport};

    fn sample_report() -> WorkbookReport {
        WorkbookReport {
            sheet_names: vec!["Roster".to_string()],
            sheets: vec![SheetReport::Grid(GridReport {
                name: "Roster".to_string(),
                max_row: 1,
                max_col: 1,
                rows: vec![vec!["Ann".to_string()]],
            })],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_report(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"sheet_names\""));
        assert!(json.contains("\"view\": \"grid\""));
        assert!(json.contains("\"max_row\": 1"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_report(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"name\":\"Roster\""));
    }
}
