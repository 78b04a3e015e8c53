//! ZIP package access for OOXML workbooks.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// ZIP package holding the parts of an Office Open XML workbook.
///
/// Provides string access to XML parts (handling UTF-8 and UTF-16
/// encodings) and parsing of `.rels` relationship files.
pub struct WorkbookPackage {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl WorkbookPackage {
    /// Open a workbook package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sheetlens::package::WorkbookPackage;
    ///
    /// let package = WorkbookPackage::open("gradebook.xlsx")?;
    /// # Ok::<(), sheetlens::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a workbook package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a workbook package from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part from the package as a string.
    ///
    /// Workbook parts are normally UTF-8, but UTF-16 LE/BE (with or
    /// without BOM) shows up in non-standard producers.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a part from the package as raw bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingPart(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the package.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// List all parts in the package.
    pub fn list_parts(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }

    /// Parse the `.rels` file belonging to a part into an id -> target map.
    ///
    /// A missing or empty `.rels` file yields an empty map, matching how
    /// producers omit it when a part has no relationships.
    pub fn relationships(&self, part_path: &str) -> Result<HashMap<String, String>> {
        let rels_path = rels_path_for(part_path);
        let xml = match self.read_xml(&rels_path) {
            Ok(content) => content,
            Err(Error::MissingPart(_)) => return Ok(HashMap::new()),
            Err(e) => return Err(e),
        };
        if xml.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let mut rels = HashMap::new();
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e))
                | Ok(quick_xml::events::Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut target = String::new();
                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            _ => {}
                        }
                    }
                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Resolve a relationship target against the directory of a base part.
    pub fn resolve_target(base: &str, target: &str) -> String {
        if let Some(stripped) = target.strip_prefix('/') {
            return stripped.to_string();
        }

        let base_dir = Path::new(base).parent().unwrap_or(Path::new(""));
        let mut result = base_dir.to_path_buf();
        for component in Path::new(target).components() {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::Normal(c) => {
                    result.push(c);
                }
                _ => {}
            }
        }
        result.to_string_lossy().replace('\\', "/")
    }
}

impl std::fmt::Debug for WorkbookPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookPackage")
            .field("parts", &self.archive.borrow().len())
            .finish()
    }
}

/// Build the `.rels` path for a part ("xl/workbook.xml" -> "xl/_rels/workbook.xml.rels").
fn rels_path_for(part_path: &str) -> String {
    if part_path.is_empty() || part_path == "/" {
        return "_rels/.rels".to_string();
    }
    let path = Path::new(part_path);
    let parent = path.parent().unwrap_or(Path::new(""));
    let filename = path.file_name().unwrap_or_default().to_string_lossy();
    if parent.as_os_str().is_empty() {
        format!("_rels/{}.rels", filename)
    } else {
        format!("{}/_rels/{}.rels", parent.display(), filename)
    }
}

/// Decode XML bytes handling UTF-8 and UTF-16 LE/BE.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.len() >= 3 && bytes[..3] == [0xEF, 0xBB, 0xBF] {
        // UTF-8 BOM
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::InvalidData(format!("invalid UTF-8 XML: {}", e)));
    }
    if bytes.len() >= 2 && bytes[..2] == [0xFF, 0xFE] {
        return decode_utf16(&bytes[2..], u16::from_le_bytes).map(patch_utf16_declaration);
    }
    if bytes.len() >= 2 && bytes[..2] == [0xFE, 0xFF] {
        return decode_utf16(&bytes[2..], u16::from_be_bytes).map(patch_utf16_declaration);
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // BOM-less UTF-16 has null bytes interleaved with the ASCII
            // of the XML declaration.
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes).map(patch_utf16_declaration)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes).map(patch_utf16_declaration)
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

/// Decode UTF-16 bytes to a String using the given byte-pair reader.
fn decode_utf16(bytes: &[u8], read_pair: fn([u8; 2]) -> u16) -> Result<String> {
    let len = bytes.len() & !1;
    let units = (0..len).step_by(2).map(|i| read_pair([bytes[i], bytes[i + 1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidData(format!("invalid UTF-16 XML: {}", e)))
}

/// Rewrite encoding="UTF-16" in the XML declaration after transcoding.
///
/// The string handed to quick-xml is UTF-8 by then; a stale UTF-16
/// declaration makes it reject the document.
fn patch_utf16_declaration(content: String) -> String {
    if !content.starts_with("<?xml") {
        return content;
    }
    match content.find("?>") {
        Some(end) => {
            let (decl, rest) = content.split_at(end + 2);
            let fixed = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");
            format!("{}{}", fixed, rest)
        }
        None => content,
    }
}
