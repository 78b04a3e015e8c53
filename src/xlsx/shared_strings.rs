//! XLSX shared strings parsing.

use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Shared strings table from xl/sharedStrings.xml.
///
/// Rich-text runs inside one entry are concatenated; phonetic runs
/// (`rPh`, furigana annotations) are skipped.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings(Vec<String>);

impl SharedStrings {
    /// Parse shared strings from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut table = Vec::new();
        let mut buf = Vec::new();
        let mut entry: Option<String> = None;
        let mut capture = false;
        let mut phonetic = 0usize;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| Error::XmlParse(e.to_string()))?;
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => entry = Some(String::new()),
                    b"rPh" if entry.is_some() => phonetic += 1,
                    b"t" if entry.is_some() && phonetic == 0 => capture = true,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"si" => {
                    table.push(String::new());
                }
                Event::Text(e) if capture => {
                    if let Some(entry) = entry.as_mut() {
                        entry.push_str(&e.unescape().unwrap_or_default());
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"si" => {
                        if let Some(done) = entry.take() {
                            table.push(done);
                        }
                    }
                    b"rPh" => phonetic = phonetic.saturating_sub(1),
                    b"t" => capture = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self(table))
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
