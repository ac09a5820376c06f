//! Page composition, assembly and metadata.
//!
//! - [`pages`] computes output page orders
//! - [`merger`] loads inputs and assembles the output document
//! - [`metadata`] reads and stamps the Info dictionary

pub mod merger;
pub mod metadata;
pub mod pages;

pub use merger::{MergeResult, MergeStatistics, Merger};
pub use metadata::{DocumentInfo, MetadataManager};
pub use pages::{MergeMode, PageRun, Removal};
