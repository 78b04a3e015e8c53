//! Error types for the sheetlens library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetlens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inspecting a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a recognizable workbook.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but cannot be read.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading the ZIP package.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook part is missing.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// The requested sheet does not exist in the workbook.
    #[error("No sheet named {0:?}")]
    SheetNotFound(String),

    /// Error while building or serializing a report.
    #[error("Report error: {0}")]
    Report(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
