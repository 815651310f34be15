//! Export failure taxonomy.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serializing record: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory output buffer could not be finalized.
    #[error("finalizing output: {0}")]
    Buffer(String),
}
