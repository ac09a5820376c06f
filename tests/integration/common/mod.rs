//! Shared helpers for the integration tests.
//!
//! Fixtures are generated with `lopdf` into a temporary directory. Every
//! page carries a `Label` entry so that page order can be checked after a
//! round trip through the writer.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pdfsplice::io::PdfWriter;
use pdfsplice::merge::{MergeResult, Merger};
use pdfsplice::output::OutputFormatter;

/// Temporary directory holding fixtures and outputs of one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of a file inside the workspace (not created).
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a PDF whose pages carry the given labels.
    pub fn pdf(&self, name: &str, labels: &[&str]) -> PathBuf {
        let path = self.path(name);
        let mut doc = labelled_document(labels);
        doc.save(&path).expect("Failed to save fixture");
        path
    }

    /// Write a PDF with an Info dictionary.
    pub fn pdf_with_info(&self, name: &str, labels: &[&str], info: &[(&str, &str)]) -> PathBuf {
        let path = self.path(name);
        let mut doc = labelled_document(labels);

        let mut dict = lopdf::Dictionary::new();
        for (key, value) in info {
            dict.set(key.as_bytes().to_vec(), Object::string_literal(*value));
        }
        let info_id = doc.add_object(dict);
        doc.trailer.set("Info", info_id);

        doc.save(&path).expect("Failed to save fixture");
        path
    }

    /// Write a file that is not a PDF.
    pub fn garbage(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, b"%PDF-1.4 definitely not a pdf").expect("Failed to write file");
        path
    }
}

/// Build an in-memory document with one labelled page per entry.
pub fn labelled_document(labels: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let content = format!("BT /F1 24 Tf 100 600 Td ({label}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Label" => Object::string_literal(*label),
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Load a PDF and return its page labels in order.
pub async fn labels_of(path: &Path) -> Vec<String> {
    let doc = Document::load(path).await.expect("Failed to reload output");
    doc.get_pages()
        .values()
        .map(|&id| {
            doc.get_dictionary(id)
                .and_then(|page| page.get(b"Label"))
                .and_then(Object::as_str)
                .map(|label| String::from_utf8_lossy(label).into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// A merger that only reports warnings and errors.
pub fn quiet_merger() -> Merger {
    Merger::new(OutputFormatter::quiet())
}

/// Assemble a result and write it to `output`.
pub async fn write(merger: &Merger, result: &MergeResult, output: &Path) {
    let document = merger
        .assemble(&result.sources, &result.plan)
        .expect("Failed to assemble output");
    PdfWriter::new()
        .save(document, output)
        .await
        .expect("Failed to write output");
}
