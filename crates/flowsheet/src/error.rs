//! Error types for flowsheet operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for flowsheet operations.
///
/// Every variant is fatal to a run; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The input workbook does not exist.
    #[error("Input workbook not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The workbook has no sheet with the requested name.
    #[error("Sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound {
        /// Requested sheet name
        sheet: String,
        /// Sheet names present in the workbook
        available: Vec<String>,
    },

    /// The workbook exists but could not be parsed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// The Graphviz layout program could not be started.
    #[error("Layout tool '{tool}' is unavailable; is Graphviz installed and on PATH?")]
    LayoutToolUnavailable {
        /// Program that failed to spawn
        tool: String,
    },

    /// The layout program ran but exited unsuccessfully.
    #[error("Layout tool '{tool}' failed: {stderr}")]
    LayoutFailed {
        /// Program that failed
        tool: String,
        /// Captured standard error of the program
        stderr: String,
    },

    /// An output file or directory could not be written.
    #[error("Failed to write output '{}': {source}", path.display())]
    OutputWriteFailed {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for flowsheet operations.
pub type Result<T> = std::result::Result<T, Error>;
