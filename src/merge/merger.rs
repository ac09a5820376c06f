//! Page operations over loaded documents.
//!
//! The merger loads the inputs of an operation into a [`SourceSet`], runs
//! the page composer to get a plan (an ordered list of [`PageRef`]s) and
//! can then assemble that plan into a new `lopdf` document.
//!
//! Assembly renumbers every source into a shared object space, flattens
//! inherited page attributes so that pages survive being moved to a new
//! page tree, and builds a single flat Pages node.

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, SpliceError};
use crate::io::{LoadedPdf, PageRef, PdfReader, SourceSet, format_file_size};
use crate::merge::metadata::{DocumentInfo, MetadataManager};
use crate::merge::pages::{self, MergeMode};
use crate::output::OutputFormatter;

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on page tree depth when resolving inherited attributes.
const MAX_TREE_DEPTH: usize = 64;

/// Catalog entries that refer to the page structure of a single source.
const DROPPED_CATALOG_KEYS: [&[u8]; 5] = [
    b"Pages",
    b"Outlines",
    b"PageLabels",
    b"OpenAction",
    b"StructTreeRoot",
];

const DEFAULT_VERSION: &str = "1.5";

/// Statistics about a page operation.
#[derive(Debug, Clone, Default)]
pub struct MergeStatistics {
    /// Number of documents that contributed to the plan.
    pub files_merged: usize,

    /// Number of inputs skipped because they do not exist.
    pub files_skipped: usize,

    /// Number of pages in the output.
    pub total_pages: usize,

    /// Number of pages dropped by a removal.
    pub pages_removed: usize,

    /// Total time taken for the operation.
    pub merge_time: Duration,

    /// Time spent loading inputs.
    pub load_time: Duration,

    /// Total size of loaded input files.
    pub input_size: u64,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }
}

/// Result of a page operation, before assembly.
#[derive(Debug)]
pub struct MergeResult {
    /// Documents the plan refers to.
    pub sources: SourceSet,

    /// Output pages in order.
    pub plan: Vec<PageRef>,

    /// Inputs that were skipped, in the order they were given.
    pub skipped: Vec<PathBuf>,

    /// Statistics about the operation.
    pub statistics: MergeStatistics,
}

/// Loads documents, composes page plans and assembles output documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    metadata_manager: MetadataManager,
    formatter: OutputFormatter,
}

impl Merger {
    /// Create a merger that reports through the given formatter.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            reader: PdfReader::new(),
            metadata_manager: MetadataManager::new(),
            formatter,
        }
    }

    /// Remove pages by 1-based index.
    ///
    /// Indices outside the document are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be loaded.
    pub async fn remove_pages(&self, input: &Path, indices: &[i64]) -> Result<MergeResult> {
        let start = Instant::now();
        let mut sources = SourceSet::new();

        let loaded = self.reader.load(input).await?;
        let load_time = loaded.load_time;
        self.describe_loaded(&loaded);
        let total = loaded.page_count;
        let source_pages = sources.insert(loaded);

        self.formatter.info(&format!("Total pages in PDF: {total}"));
        self.formatter
            .info(&format!("Pages to remove: {}", format_indices(indices)));

        let removal = pages::remove_pages(&source_pages, indices);
        if !removal.ignored.is_empty() {
            log::debug!(
                "ignoring page numbers outside 1..={total}: {}",
                format_indices(&removal.ignored)
            );
        }

        let statistics = MergeStatistics {
            files_merged: 1,
            total_pages: removal.kept.len(),
            pages_removed: removal.removed,
            merge_time: start.elapsed(),
            load_time,
            input_size: sources.total_size(),
            ..Default::default()
        };

        Ok(MergeResult {
            sources,
            plan: removal.kept,
            skipped: Vec::new(),
            statistics,
        })
    }

    /// Combine the pages of `add` with `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if either document cannot be loaded, or if insert
    /// mode has no position.
    pub async fn combine(
        &self,
        base: &Path,
        add: &Path,
        mode: MergeMode,
        position: Option<i64>,
    ) -> Result<MergeResult> {
        if mode == MergeMode::Insert && position.is_none() {
            return Err(SpliceError::MissingPosition);
        }

        let start = Instant::now();
        let mut sources = SourceSet::new();

        let base_pdf = self.reader.load(base).await?;
        let add_pdf = self.reader.load(add).await?;
        let load_time = base_pdf.load_time + add_pdf.load_time;

        self.formatter.info(&format!(
            "Base PDF: {} ({} pages)",
            base.display(),
            base_pdf.page_count
        ));
        self.describe_loaded(&base_pdf);
        self.formatter.info(&format!(
            "Add PDF: {} ({} pages)",
            add.display(),
            add_pdf.page_count
        ));
        self.describe_loaded(&add_pdf);
        self.formatter.info(&format!("Merge position: {mode}"));

        let added = add_pdf.page_count;
        let base_pages = sources.insert(base_pdf);
        let add_pages = sources.insert(add_pdf);

        let plan = pages::combine(&base_pages, &add_pages, mode, position)?;

        match (mode, position) {
            (MergeMode::Append, _) => self
                .formatter
                .info(&format!("Appended {added} pages to end of base PDF")),
            (MergeMode::Prepend, _) => self
                .formatter
                .info(&format!("Prepended {added} pages to start of base PDF")),
            (MergeMode::Insert, Some(position)) => self
                .formatter
                .info(&format!("Inserted {added} pages at position {position}")),
            (MergeMode::Insert, None) => {}
        }

        let statistics = MergeStatistics {
            files_merged: sources.len(),
            total_pages: plan.len(),
            merge_time: start.elapsed(),
            load_time,
            input_size: sources.total_size(),
            ..Default::default()
        };

        Ok(MergeResult {
            sources,
            plan,
            skipped: Vec::new(),
            statistics,
        })
    }

    /// Concatenate all pages of every input in order.
    ///
    /// Inputs that do not exist are skipped with a warning, so skipping
    /// every input yields an empty plan. Inputs that do not exist but look
    /// like glob patterns are expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing input cannot be loaded.
    pub async fn concatenate_all(&self, inputs: &[PathBuf]) -> Result<MergeResult> {
        let start = Instant::now();
        let mut sources = SourceSet::new();
        let mut sequences = Vec::new();
        let mut skipped = Vec::new();
        let mut load_time = Duration::ZERO;

        for input in expand_inputs(inputs) {
            let path = match input {
                Ok(path) => path,
                Err(pattern) => {
                    self.skip(&pattern, "no file matches this pattern");
                    skipped.push(pattern);
                    continue;
                }
            };

            match self.reader.load(&path).await {
                Ok(loaded) => {
                    self.formatter.info(&format!(
                        "Adding {} ({} pages)",
                        path.display(),
                        loaded.page_count
                    ));
                    self.describe_loaded(&loaded);
                    load_time += loaded.load_time;
                    sequences.push(sources.insert(loaded));
                }
                Err(e) if e.is_recoverable() => {
                    self.skip(&path, &e.to_string());
                    skipped.push(path);
                }
                Err(e) => return Err(e),
            }
        }

        let plan = pages::concatenate(&sequences);

        let statistics = MergeStatistics {
            files_merged: sources.len(),
            files_skipped: skipped.len(),
            total_pages: plan.len(),
            merge_time: start.elapsed(),
            load_time,
            input_size: sources.total_size(),
            ..Default::default()
        };

        Ok(MergeResult {
            sources,
            plan,
            skipped,
            statistics,
        })
    }

    /// Load a document and describe it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded.
    pub async fn inspect(&self, input: &Path) -> Result<DocumentInfo> {
        let loaded = self.reader.load(input).await?;
        self.describe_loaded(&loaded);
        Ok(self
            .metadata_manager
            .document_info(&loaded.document, &loaded.path))
    }

    /// Build a new document containing the pages of `plan` in order.
    ///
    /// A page that appears more than once gets one page object per
    /// occurrence; the copies share contents and resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan refers to a page or document that is
    /// not in `sources`.
    pub fn assemble(&self, sources: &SourceSet, plan: &[PageRef]) -> Result<Document> {
        let used: BTreeSet<usize> = plan.iter().map(|page| page.source).collect();

        let version = used
            .iter()
            .filter_map(|&source| sources.get(source))
            .map(|loaded| loaded.version())
            .max()
            .unwrap_or(DEFAULT_VERSION);

        let mut merged = Document::with_version(version);
        let mut page_ids: HashMap<PageRef, ObjectId> = HashMap::new();
        let mut catalog: Option<Dictionary> = None;

        for &source in &used {
            let loaded = sources.get(source).ok_or_else(|| {
                SpliceError::merge_failed(format!("Page plan refers to unknown source #{source}"))
            })?;

            let mut doc = loaded.document.clone();
            flatten_inherited_attributes(&mut doc);
            doc.renumber_objects_with(merged.max_id + 1);

            for (number, id) in doc.get_pages() {
                page_ids.insert(PageRef::new(source, number), id);
            }

            let tree_nodes = page_tree_nodes(&doc);
            if catalog.is_none() {
                catalog = doc.catalog().ok().cloned();
            }

            merged.max_id = merged.max_id.max(doc.max_id);
            merged.objects.extend(
                doc.objects
                    .into_iter()
                    .filter(|(id, _)| !tree_nodes.contains(id)),
            );
        }

        let pages_id = merged.new_object_id();
        let mut kids = Vec::with_capacity(plan.len());
        let mut placed = HashSet::with_capacity(plan.len());

        for page in plan {
            let id = *page_ids.get(page).ok_or_else(|| {
                SpliceError::merge_failed(format!(
                    "Page {} does not exist in {}",
                    page.page_number,
                    sources
                        .path(page.source)
                        .map(|path| path.display().to_string())
                        .unwrap_or_else(|| format!("source #{}", page.source))
                ))
            })?;

            let id = if placed.insert(id) {
                id
            } else {
                let copy = merged.get_dictionary(id)?.clone();
                merged.add_object(copy)
            };

            merged.get_dictionary_mut(id)?.set("Parent", pages_id);
            kids.push(Object::Reference(id));
        }

        merged.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
            }),
        );

        let mut catalog = catalog.unwrap_or_default();
        for key in DROPPED_CATALOG_KEYS {
            catalog.remove(key);
        }
        catalog.set("Type", "Catalog");
        catalog.set("Pages", pages_id);
        let catalog_id = merged.add_object(catalog);
        merged.trailer.set("Root", catalog_id);

        self.metadata_manager.stamp_producer(&mut merged);

        merged.prune_objects();
        merged.renumber_objects();

        log::debug!(
            "assembled {} pages from {} sources into {} objects",
            plan.len(),
            used.len(),
            merged.objects.len()
        );

        Ok(merged)
    }

    fn describe_loaded(&self, loaded: &LoadedPdf) {
        self.formatter
            .detail("File", &loaded.path.display().to_string());
        self.formatter.detail("Version", loaded.version());
        self.formatter
            .detail("Objects", &loaded.object_count().to_string());
        self.formatter
            .detail("Size", &format_file_size(loaded.file_size));
        self.formatter
            .detail("Load time", &format!("{:?}", loaded.load_time));
    }

    fn skip(&self, path: &Path, reason: &str) {
        log::debug!("skipping {}: {reason}", path.display());
        self.formatter.warning(&format!(
            "File '{}' not found. Skipping...",
            path.display()
        ));
    }
}

/// Expand inputs that are glob patterns rather than existing paths.
///
/// Each item is either a path to load or a pattern that matched nothing.
fn expand_inputs(inputs: &[PathBuf]) -> Vec<std::result::Result<PathBuf, PathBuf>> {
    let mut expanded = Vec::with_capacity(inputs.len());

    for input in inputs {
        let text = input.to_string_lossy();
        let is_pattern = text.contains(['*', '?', '[']);

        if !is_pattern || input.exists() {
            expanded.push(Ok(input.clone()));
            continue;
        }

        match glob::glob(&text) {
            Ok(paths) => {
                let matches: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
                if matches.is_empty() {
                    expanded.push(Err(input.clone()));
                } else {
                    log::debug!("{} matched {} files", text, matches.len());
                    expanded.extend(matches.into_iter().map(Ok));
                }
            }
            // Not a valid pattern; let the loader report it as missing.
            Err(_) => expanded.push(Ok(input.clone())),
        }
    }

    expanded
}

/// Copy inherited page attributes onto each page dictionary.
fn flatten_inherited_attributes(doc: &mut Document) {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

    for page_id in page_ids {
        let inherited: Vec<(&[u8], Object)> = INHERITABLE_KEYS
            .iter()
            .filter_map(|&key| inherited_value(doc, page_id, key).map(|value| (key, value)))
            .collect();

        if inherited.is_empty() {
            continue;
        }

        if let Ok(page) = doc.get_dictionary_mut(page_id) {
            for (key, value) in inherited {
                page.set(key.to_vec(), value);
            }
        }
    }
}

/// Value of `key` inherited from the nearest ancestor, if the page lacks it.
fn inherited_value(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let page = doc.get_dictionary(page_id).ok()?;
    if page.has(key) {
        return None;
    }

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    None
}

/// Ids of the catalog and every intermediate Pages node.
fn page_tree_nodes(doc: &Document) -> HashSet<ObjectId> {
    let mut nodes = HashSet::new();

    let Ok(root) = doc.trailer.get(b"Root").and_then(Object::as_reference) else {
        return nodes;
    };
    nodes.insert(root);

    let mut pending: Vec<ObjectId> = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .into_iter()
        .collect();

    while let Some(id) = pending.pop() {
        if !nodes.insert(id) {
            continue;
        }
        let Ok(node) = doc.get_dictionary(id) else {
            continue;
        };
        let is_pages = node
            .get(b"Type")
            .and_then(Object::as_name)
            .is_ok_and(|name| name == b"Pages");
        if !is_pages && !node.has(b"Kids") {
            // A leaf page, not a tree node.
            nodes.remove(&id);
            continue;
        }
        if let Ok(kids) = node.get(b"Kids").and_then(Object::as_array) {
            pending.extend(kids.iter().filter_map(|kid| kid.as_reference().ok()));
        }
    }

    nodes
}

fn format_indices(indices: &[i64]) -> String {
    let parts: Vec<String> = indices.iter().map(i64::to_string).collect();
    format!("[{}]", parts.join(", "))
}
