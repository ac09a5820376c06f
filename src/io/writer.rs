//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to a temporary sibling, then rename)
//! - Compression levels
//! - Write statistics
//!
//! Because the output only replaces the destination after it has been
//! fully written, the output path may also be one of the inputs.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{Result, SpliceError};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compress streams before writing.
    pub compress: bool,

    /// Drop empty streams and unreferenced objects before writing.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compress: true,
            optimize: false,
            buffer_size: 8192,
        }
    }
}

impl WriteOptions {
    /// Options matching a compression level.
    pub fn from_compression(level: CompressionLevel) -> Self {
        let (compress, optimize) = match level {
            CompressionLevel::None => (false, false),
            CompressionLevel::Standard => (true, false),
            CompressionLevel::Maximum => (true, true),
        };

        Self {
            compress,
            optimize,
            ..Default::default()
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Whether compression was applied.
    pub compressed: bool,

    /// Whether optimization was applied.
    pub optimized: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer for a compression level.
    pub fn with_compression(level: CompressionLevel) -> Self {
        Self::with_options(WriteOptions::from_compression(level))
    }

    /// Save a PDF document to a file.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await?;
        Ok(())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// Serialisation runs on the blocking pool and is awaited before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output (or its temporary sibling) cannot be created
    /// - Serialising or flushing the document fails
    /// - The temporary file cannot be renamed into place
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();
        let mut doc = doc;

        task::spawn_blocking(move || {
            let start = Instant::now();

            if options.optimize {
                doc.delete_zero_length_streams();
                doc.prune_objects();
                doc.renumber_objects();
            }

            if options.compress {
                doc.compress();
            }

            let write_path = if options.atomic {
                temp_path(&path_buf)
            } else {
                path_buf.clone()
            };

            let file = std::fs::File::create(&write_path).map_err(|e| {
                SpliceError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            doc.save_to(&mut writer)
                .map_err(|e| SpliceError::FailedToWrite {
                    path: write_path.clone(),
                    source: std::io::Error::other(e),
                })?;

            writer.flush().map_err(|e| SpliceError::FailedToWrite {
                path: write_path.clone(),
                source: e,
            })?;
            drop(writer);

            if options.atomic {
                std::fs::rename(&write_path, &path_buf).map_err(|e| {
                    SpliceError::FailedToWrite {
                        path: path_buf.clone(),
                        source: e,
                    }
                })?;
            }

            let write_time = start.elapsed();
            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            log::debug!(
                "wrote {} ({}) in {:?}",
                path_buf.display(),
                format_file_size(file_size),
                write_time
            );

            Ok::<_, SpliceError>(WriteStatistics {
                write_time,
                file_size,
                output_path: path_buf,
                compressed: options.compress,
                optimized: options.optimize,
            })
        })
        .await
        .map_err(|e| SpliceError::other(format!("Write task failed: {e}")))?
    }

    /// Check if a file can be written to the given path.
    ///
    /// Performs pre-flight checks without actually writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory does not exist or is
    /// read-only.
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        let metadata = tokio::fs::metadata(parent).await.map_err(|_| {
            SpliceError::output_not_writable(parent.to_path_buf(), "directory does not exist")
        })?;

        if !metadata.is_dir() {
            return Err(SpliceError::output_not_writable(
                parent.to_path_buf(),
                "not a directory",
            ));
        }

        if metadata.permissions().readonly() {
            return Err(SpliceError::output_not_writable(
                parent.to_path_buf(),
                "directory is read-only",
            ));
        }

        Ok(())
    }
}

/// Temporary sibling used for atomic writes: `out.pdf` becomes `out.pdf.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
