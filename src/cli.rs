//! CLI argument parsing for pdfsplice.
//!
//! This module only describes the command line with `clap`; turning the
//! parsed arguments into a validated [`Config`](crate::config::Config)
//! happens in the `config` module. It is also compiled by the build script
//! to render the man page, so it depends on nothing but `clap` and `std`.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("{:?}", cli.command);
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Remove, reorder and combine pages of PDF documents.
///
/// Every command reads one or more PDF files, builds a new page order
/// and writes it to a new file. Page numbers are 1-based. Command names
/// are matched without regard to case.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Remove, append, prepend, insert and concatenate PDF pages", long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output - show details about every loaded PDF
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings (such as skipped inputs) are printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run - load the inputs and print the page plan without writing
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Compression level for the output PDF
    ///
    /// - none: write objects as they are
    /// - standard: compress uncompressed streams (default)
    /// - maximum: also drop empty streams and unused objects
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "standard",
        env = "PDFSPLICE_COMPRESSION"
    )]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove specific pages from a PDF
    ///
    /// Pages are given as a comma-separated list of 1-based numbers.
    /// Numbers outside the document are ignored.
    Remove {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Pages to remove, e.g. "2,4,6"
        #[arg(value_name = "PAGES", allow_hyphen_values = true)]
        pages: String,
    },

    /// Add the pages of one PDF to the end of another
    Append {
        /// Base PDF file
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// PDF whose pages are added
        #[arg(value_name = "ADD")]
        add: PathBuf,

        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Add the pages of one PDF to the beginning of another
    Prepend {
        /// Base PDF file
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// PDF whose pages are added
        #[arg(value_name = "ADD")]
        add: PathBuf,

        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Insert the pages of one PDF before a page of another
    ///
    /// Positions past the end append, positions of 1 or less prepend.
    Insert {
        /// Base PDF file
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// PDF whose pages are inserted
        #[arg(value_name = "ADD")]
        add: PathBuf,

        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// 1-based base page before which the pages are inserted
        #[arg(value_name = "POSITION", allow_negative_numbers = true)]
        position: i64,
    },

    /// Merge several PDF files into one
    ///
    /// Files that cannot be found are skipped with a warning.
    /// Glob patterns such as "chapter*.pdf" are expanded.
    Multiple {
        /// Output PDF file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Input PDF files, in merge order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show page count and metadata of a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse `args`, accepting command names in any case.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments, or for help and
    /// version requests.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_command_name(args))
    }
}

/// Lowercase the first argument that names a command in another case.
///
/// Option values cannot collide with command names, so the first match
/// is the command itself.
fn normalize_command_name<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cmd = Cli::command();
    let mut names: Vec<&str> = cmd.get_subcommands().map(|sub| sub.get_name()).collect();
    names.push("help");

    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let command = args.iter_mut().skip(1).find_map(|arg| {
        let lower = arg.to_str()?.to_ascii_lowercase();
        names.contains(&lower.as_str()).then_some((arg, lower))
    });
    if let Some((arg, lower)) = command {
        *arg = OsString::from(lower);
    }

    args
}

impl Command {
    /// Name of the command as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remove { .. } => "remove",
            Self::Append { .. } => "append",
            Self::Prepend { .. } => "prepend",
            Self::Insert { .. } => "insert",
            Self::Multiple { .. } => "multiple",
            Self::Info { .. } => "info",
        }
    }

    /// One-line usage of the command.
    pub fn usage(&self) -> &'static str {
        match self {
            Self::Remove { .. } => "pdfsplice remove <INPUT> <OUTPUT> <PAGES>",
            Self::Append { .. } => "pdfsplice append <BASE> <ADD> <OUTPUT>",
            Self::Prepend { .. } => "pdfsplice prepend <BASE> <ADD> <OUTPUT>",
            Self::Insert { .. } => "pdfsplice insert <BASE> <ADD> <OUTPUT> <POSITION>",
            Self::Multiple { .. } => "pdfsplice multiple <OUTPUT> <FILE>...",
            Self::Info { .. } => "pdfsplice info <INPUT>",
        }
    }
}

const EXAMPLES: &str = "\
Examples:
  # Remove pages 2, 4 and 6
  pdfsplice remove input.pdf output.pdf 2,4,6

  # Append two PDFs
  pdfsplice append first.pdf second.pdf combined.pdf

  # Insert pages before page 5
  pdfsplice insert main.pdf insert.pdf result.pdf 5

  # Merge several PDFs
  pdfsplice multiple final.pdf doc1.pdf doc2.pdf doc3.pdf";
