//! Error types for pdfsplice.
//!
//! Every fallible operation in the crate returns [`SpliceError`]. Messages
//! are meant to be shown to the user as-is, so each variant carries the
//! path or value that caused it.
//!
//! # Error Categories
//!
//! - **Usage Errors**: malformed command-line input
//! - **Input Errors**: file not found, not a file, unreadable PDF
//! - **Merge Errors**: unsupported merge mode, missing insert position
//! - **Output Errors**: output cannot be created or written

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, SpliceError>;

/// Main error type for pdfsplice operations.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    /// Command-line arguments are missing or malformed.
    #[error("{message}")]
    Usage {
        /// What was wrong with the arguments.
        message: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// The PDF library could not load the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the parser.
        reason: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// No input was given to concatenate.
    #[error("No PDF files to merge")]
    NoFilesToMerge,

    /// Merge mode string is not one of append, prepend or insert.
    #[error("Unsupported merge mode: '{mode}'. Use 'append', 'prepend', or 'insert'")]
    InvalidMode {
        /// The rejected mode.
        mode: String,
    },

    /// Insert mode was requested without a position.
    #[error("A page position is required for 'insert' mode")]
    MissingPosition,

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output location cannot take a new file.
    #[error("Cannot write output: {}\n  Reason: {reason}", path.display())]
    OutputNotWritable {
        /// Directory the output would be written to.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Building the output page tree failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for SpliceError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl SpliceError {
    /// Create a Usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an InvalidMode error.
    pub fn invalid_mode(mode: impl Into<String>) -> Self {
        Self::InvalidMode { mode: mode.into() }
    }

    /// Create an OutputNotWritable error.
    pub fn output_not_writable(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::OutputNotWritable {
            path,
            reason: reason.into(),
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if `multiple` may skip the input that caused this error.
    ///
    /// Only a missing input is skipped. An input that exists but cannot be
    /// loaded aborts the command.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }

    /// Check if this error was caused by the command line rather than by
    /// any file.
    ///
    /// The binary follows these with the usage line of the command.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::Usage { .. }
                | Self::InvalidMode { .. }
                | Self::MissingPosition
                | Self::InvalidConfig { .. }
        )
    }

    /// Process exit code for this error.
    ///
    /// Usage and runtime failures share status 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
