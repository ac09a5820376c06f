//! PDF metadata management.
//!
//! This module reads the document Info dictionary for `info` and stamps
//! the Producer entry on every written document.

use lopdf::{Dictionary, Document, Object, StringFormat, dictionary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Producer written into the Info dictionary of every output.
pub const PRODUCER: &str = concat!("pdfsplice ", env!("CARGO_PKG_VERSION"));

/// Summary of a PDF document as printed by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Path the document was loaded from.
    pub path: PathBuf,

    /// Number of pages.
    pub page_count: usize,

    /// PDF version from the file header.
    pub version: String,

    /// Info dictionary entries, keys prefixed with `/`.
    pub metadata: BTreeMap<String, String>,
}

/// Manager for PDF metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Describe a loaded document.
    ///
    /// A document without an Info dictionary yields an empty mapping.
    pub fn document_info(&self, doc: &Document, path: &Path) -> DocumentInfo {
        DocumentInfo {
            path: path.to_path_buf(),
            page_count: doc.get_pages().len(),
            version: doc.version.clone(),
            metadata: self.get_metadata(doc),
        }
    }

    /// Read the Info dictionary as text.
    pub fn get_metadata(&self, doc: &Document) -> BTreeMap<String, String> {
        let Some(info) = info_dictionary(doc) else {
            return BTreeMap::new();
        };

        info.iter()
            .map(|(key, value)| {
                (
                    format!("/{}", String::from_utf8_lossy(key)),
                    render_value(doc, value, true),
                )
            })
            .collect()
    }

    /// Replace the Info dictionary with one naming this tool as Producer.
    pub fn stamp_producer(&self, doc: &mut Document) {
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        });
        doc.trailer.set("Info", Object::Reference(info_id));
    }
}

/// The Info dictionary, whether stored inline or by reference.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Render an Info value as text, following at most one reference.
fn render_value(doc: &Document, value: &Object, follow: bool) -> String {
    match value {
        Object::String(bytes, _) => decode_text(bytes),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => r.to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Null => "null".to_string(),
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(target) if follow => render_value(doc, target, false),
            _ => format!("{} {} R", id.0, id.1),
        },
        Object::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| render_value(doc, item, false))
                .collect();
            format!("[{}]", items.join(", "))
        }
        Object::Dictionary(_) => "<<dictionary>>".to_string(),
        Object::Stream(_) => "<<stream>>".to_string(),
    }
}

/// Decode a PDF text string.
///
/// UTF-16BE and UTF-8 are recognised by their byte order marks; anything
/// else is read one byte per character.
pub fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
