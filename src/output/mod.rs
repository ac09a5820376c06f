//! Output formatting and display for pdfsplice.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Dry-run page plans
//! - Summary reports
//! - `info` reports as text or JSON
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::output::create_formatter;
//! use pdfsplice::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = create_formatter(&config);
//! formatter.info("Loading input");
//! formatter.success("Done");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use std::path::Path;

use crate::config::{Config, Operation};
use crate::error::{Result, SpliceError};
use crate::io::{PageRef, SourceSet, WriteStatistics};
use crate::merge::merger::MergeStatistics;
use crate::merge::metadata::DocumentInfo;
use crate::merge::pages::page_runs;

/// Create an output formatter from configuration.
///
/// Dry runs print their plan even in quiet mode.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::new(!config.should_print(), config.verbose)
}

/// Display the page plan of a dry run.
pub fn display_plan(
    formatter: &OutputFormatter,
    output: &Path,
    sources: &SourceSet,
    plan: &[PageRef],
) {
    formatter.section(&format!(
        "Dry run: {} would contain {} pages",
        output.display(),
        plan.len()
    ));

    for (index, run) in page_runs(plan).iter().enumerate() {
        let source = sources
            .path(run.source)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| format!("source #{}", run.source));
        formatter.list_item(index + 1, &format!("{source}: {run}"));
    }

    formatter.blank_line();
    formatter.info("No file written.");
}

/// Display the summary after an output has been written.
pub fn display_summary(
    formatter: &OutputFormatter,
    operation: &Operation,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.blank_line();
    formatter.success(&format!(
        "Successfully created {}",
        write.output_path.display()
    ));

    if matches!(operation, Operation::Remove { .. }) {
        formatter.info(&format!("Pages kept: {}", merge.total_pages));
        formatter.info(&format!("Pages removed: {}", merge.pages_removed));
    } else {
        formatter.info(&format!("Total pages: {}", merge.total_pages));
    }

    if merge.files_skipped > 0 {
        formatter.warning(&format!("{} file(s) skipped", merge.files_skipped));
    }

    formatter.detail("Input size", &merge.format_input_size());
    formatter.detail("Output size", &write.format_file_size());
    formatter.detail(
        "Load time",
        &format!("{:.2}s", merge.load_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", write.write_time.as_secs_f64()),
    );
}

/// Render an `info` report.
///
/// # Errors
///
/// Returns an error if JSON serialisation fails.
pub fn render_info(info: &DocumentInfo, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(info)
            .map_err(|e| SpliceError::other(format!("Failed to serialize info: {e}")));
    }

    let mut lines = vec![
        "PDF Information".to_string(),
        "=".repeat(50),
        format!("Filename: {}", info.path.display()),
        format!("Pages: {}", info.page_count),
        format!("Version: {}", info.version),
    ];

    if !info.metadata.is_empty() {
        lines.push(String::new());
        lines.push("Metadata:".to_string());
        lines.extend(
            info.metadata
                .iter()
                .map(|(key, value)| format!("  {key}: {value}")),
        );
    }

    Ok(lines.join("\n"))
}
