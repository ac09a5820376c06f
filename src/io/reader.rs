//! PDF reading and loading operations.
//!
//! Loading checks that the path names an existing regular file before the
//! parser sees it, so that a missing input is reported as such instead of
//! as a parse failure.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{Result, SpliceError};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    /// PDF version declared in the file header.
    pub fn version(&self) -> &str {
        &self.document.version
    }

    /// Number of objects in the document.
    pub fn object_count(&self) -> usize {
        self.document.objects.len()
    }
}

/// PDF reader backed by `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist ([`SpliceError::FileNotFound`])
    /// - The path is not a regular file ([`SpliceError::NotAFile`])
    /// - The PDF is encrypted ([`SpliceError::EncryptedPdf`])
    /// - The file cannot be parsed ([`SpliceError::FailedToLoadPdf`])
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let file_size = check_path_exists(path).await?;
        let path_buf = path.to_path_buf();

        let start = Instant::now();

        let document = Document::load(&path_buf).await.map_err(|e| {
            let err_msg = e.to_string();
            let lower = err_msg.to_lowercase();
            if lower.contains("encrypt") || lower.contains("password") {
                SpliceError::encrypted_pdf(path_buf.clone())
            } else {
                SpliceError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if document.is_encrypted() {
            return Err(SpliceError::encrypted_pdf(path_buf));
        }

        let load_time = start.elapsed();
        let page_count = document.get_pages().len();

        log::debug!(
            "loaded {} ({} pages, version {}) in {:?}",
            path_buf.display(),
            page_count,
            document.version,
            load_time
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size,
        })
    }
}

/// Check that `path` is an existing regular file and return its size.
pub async fn check_path_exists(path: &Path) -> Result<u64> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SpliceError::file_not_found(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_file() {
        return Err(SpliceError::not_a_file(path.to_path_buf()));
    }

    Ok(metadata.len())
}
