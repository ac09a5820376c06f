//! Configuration module for pdfsplice.
//!
//! This module transforms CLI arguments into a validated configuration
//! that drives one page operation. It handles:
//! - Parsing of page lists and compression levels
//! - Resolution of the merge mode for append/prepend/insert
//! - Validation of flag combinations

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::{Cli, Command};
use crate::error::{Result, SpliceError};
use crate::merge::MergeMode;

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - objects are written as loaded.
    None,
    /// Compress streams that are not compressed yet.
    #[default]
    Standard,
    /// Compress streams and drop empty streams.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = SpliceError;

    /// Parse compression level from "none", "standard" or "maximum".
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(SpliceError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// 1-based page numbers requested for removal.
///
/// Parsed from a comma-separated list such as `"2,4,6"`. Duplicates,
/// unordered values and numbers outside the document are kept as given;
/// the page composer decides what they match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageList {
    pages: Vec<i64>,
}

impl PageList {
    /// Parse a comma-separated page list.
    ///
    /// Whitespace around each number is ignored. Any entry that is not an
    /// integer (including an empty entry) is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfsplice::config::PageList;
    ///
    /// let pages = PageList::parse("2, 4,2").unwrap();
    /// assert_eq!(pages.as_slice(), &[2, 4, 2]);
    /// assert!(PageList::parse("2,,4").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let pages = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<i64>().map_err(|_| {
                    SpliceError::usage(format!("Invalid page number: '{part}'"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { pages })
    }

    /// Page numbers in the order given.
    pub fn as_slice(&self) -> &[i64] {
        &self.pages
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl From<Vec<i64>> for PageList {
    fn from(pages: Vec<i64>) -> Self {
        Self { pages }
    }
}

/// The page operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Drop pages from a single document.
    Remove {
        /// Source document.
        input: PathBuf,
        /// Destination document.
        output: PathBuf,
        /// Pages to drop.
        pages: PageList,
    },

    /// Combine two documents with append, prepend or insert.
    Combine {
        /// Base document.
        base: PathBuf,
        /// Document whose pages are added.
        add: PathBuf,
        /// Destination document.
        output: PathBuf,
        /// How the pages are combined.
        mode: MergeMode,
        /// 1-based insert position; only used by [`MergeMode::Insert`].
        position: Option<i64>,
    },

    /// Concatenate any number of documents, skipping unreadable ones.
    Concatenate {
        /// Inputs in merge order (patterns not expanded yet).
        inputs: Vec<PathBuf>,
        /// Destination document.
        output: PathBuf,
    },

    /// Print page count and metadata.
    Inspect {
        /// Document to inspect.
        input: PathBuf,
        /// Emit JSON instead of text.
        json: bool,
    },
}

impl Operation {
    /// Output path, if the operation writes one.
    pub fn output(&self) -> Option<&Path> {
        match self {
            Self::Remove { output, .. }
            | Self::Combine { output, .. }
            | Self::Concatenate { output, .. } => Some(output),
            Self::Inspect { .. } => None,
        }
    }

    /// Short title used in output headers.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Remove { .. } => "Remove Pages",
            Self::Combine { mode, .. } => match mode {
                MergeMode::Append => "Append Pages",
                MergeMode::Prepend => "Prepend Pages",
                MergeMode::Insert => "Insert Pages",
            },
            Self::Concatenate { .. } => "Merge Multiple PDFs",
            Self::Inspect { .. } => "PDF Information",
        }
    }
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// The operation to perform.
    pub operation: Operation,

    /// Dry run mode - compute the page plan without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Compression level for output.
    pub compression: CompressionLevel,
}

impl Config {
    /// Create a configuration with default output settings.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            dry_run: false,
            verbose: false,
            quiet: false,
            compression: CompressionLevel::default(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Verbose and quiet modes are both enabled
    /// - A merge of multiple files has no inputs
    /// - Insert mode has no position
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(SpliceError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        match &self.operation {
            Operation::Concatenate { inputs, .. } if inputs.is_empty() => {
                Err(SpliceError::NoFilesToMerge)
            }
            Operation::Combine {
                mode: MergeMode::Insert,
                position: None,
                ..
            } => Err(SpliceError::MissingPosition),
            _ => Ok(()),
        }
    }

    /// Check if regular output should be displayed.
    ///
    /// Dry runs always print their plan, even in quiet mode.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}

impl TryFrom<&Cli> for Config {
    type Error = SpliceError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let compression = CompressionLevel::from_str(&cli.compression)?;

        let operation = match &cli.command {
            Command::Remove {
                input,
                output,
                pages,
            } => Operation::Remove {
                input: input.clone(),
                output: output.clone(),
                pages: PageList::parse(pages)?,
            },
            Command::Append { base, add, output } => Operation::Combine {
                base: base.clone(),
                add: add.clone(),
                output: output.clone(),
                mode: MergeMode::Append,
                position: None,
            },
            Command::Prepend { base, add, output } => Operation::Combine {
                base: base.clone(),
                add: add.clone(),
                output: output.clone(),
                mode: MergeMode::Prepend,
                position: None,
            },
            Command::Insert {
                base,
                add,
                output,
                position,
            } => Operation::Combine {
                base: base.clone(),
                add: add.clone(),
                output: output.clone(),
                mode: MergeMode::Insert,
                position: Some(*position),
            },
            Command::Multiple { output, inputs } => Operation::Concatenate {
                inputs: inputs.clone(),
                output: output.clone(),
            },
            Command::Info { input, json } => Operation::Inspect {
                input: input.clone(),
                json: *json,
            },
        };

        let config = Self {
            operation,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            quiet: cli.quiet,
            compression,
        };

        config.validate()?;
        Ok(config)
    }
}
