//! In-memory PDF builders shared by unit tests.

use lopdf::{Document, Object, Stream, dictionary};
use std::path::Path;

/// Build a document with one page per label.
///
/// Each page carries its label under a `Label` key so that page order can
/// be checked after reassembly. MediaBox and Resources live on the Pages
/// root and are inherited by every page.
pub(crate) fn labelled_document(labels: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::with_capacity(labels.len());
    for label in labels {
        let content = format!("BT /F1 12 Tf 72 720 Td ({label}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Label" => Object::string_literal(*label),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => labels.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Labels of the pages of a document, in page order.
pub(crate) fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            doc.get_dictionary(page_id)
                .and_then(|page| page.get(b"Label"))
                .and_then(Object::as_str)
                .map(|label| String::from_utf8_lossy(label).into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Save a labelled document to `path`.
pub(crate) fn write_labelled_pdf(path: &Path, labels: &[&str]) {
    let mut doc = labelled_document(labels);
    doc.save(path).unwrap();
}
