//! PDF input/output.
//!
//! - [`reader`] loads documents with `lopdf`
//! - [`writer`] saves assembled documents atomically
//! - [`sources`] tracks loaded documents and hands out page handles

pub mod reader;
pub mod sources;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use reader::{LoadedPdf, PdfReader};
pub use sources::{PageRef, SourceSet};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics, format_file_size};
