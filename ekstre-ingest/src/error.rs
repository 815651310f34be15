//! Import failure taxonomy.
//!
//! Statement formats do not self-correct, so any malformed row fails the
//! whole file: the transaction list of one import is all-or-nothing. Row
//! numbers are 1-based positions in the source file so a human can find the
//! offending line.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// Could not read the statement file at all.
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The statement's column-header marker never appeared; this is not a
    /// statement of the expected bank layout.
    #[error("{path}: statement header row not found")]
    HeaderNotFound { path: PathBuf },

    /// The card identity line did not have the expected shape.
    #[error("malformed card header: {reason}")]
    CardLine { reason: String },

    /// A transaction row's date field did not parse as a calendar date.
    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    /// A transaction row's amount field carried no usable numeric run.
    #[error("row {row}: cannot parse amount '{value}'")]
    InvalidAmount { row: usize, value: String },

    /// The trailing currency token was not in the reference table and this
    /// bank's parser does not fall back to a default.
    #[error("row {row}: unknown currency '{symbol}'")]
    UnknownCurrency { row: usize, symbol: String },

    /// A row inside the transaction body had fewer columns than the layout
    /// declares.
    #[error("row {row}: expected at least {expected} columns")]
    MissingColumn { row: usize, expected: usize },

    /// The spreadsheet container itself could not be opened or read.
    #[error("{path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },
}
