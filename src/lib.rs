//! pdfsplice - Remove, reorder and combine pages of PDF documents.
//!
//! This library provides the page operations behind the `pdfsplice`
//! command:
//!
//! - Removing pages by number
//! - Appending, prepending and inserting the pages of another document
//! - Concatenating any number of documents
//! - Reading page count and metadata
//!
//! Operations first compute a page plan over the loaded documents, which
//! is then assembled into a new document and written atomically.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::PdfWriter;
//! use pdfsplice::merge::{MergeMode, Merger};
//! use pdfsplice::output::OutputFormatter;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let merger = Merger::new(OutputFormatter::default());
//! let result = merger
//!     .combine(Path::new("main.pdf"), Path::new("insert.pdf"), MergeMode::Insert, Some(5))
//!     .await?;
//!
//! let document = merger.assemble(&result.sources, &result.plan)?;
//! PdfWriter::new().save(document, Path::new("result.pdf")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SpliceError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
