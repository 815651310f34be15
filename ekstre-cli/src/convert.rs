//! Conversion orchestration: resolve capabilities by name, run per-file
//! imports concurrently, merge in input order, export in one pass.

use std::path::PathBuf;

use futures_util::future::try_join_all;
use thiserror::Error;

use ekstre_core::model::CardTransaction;
use ekstre_export::{ExportError, Exporter, find_exporter};
use ekstre_ingest::{ImportError, find_importer};

#[derive(Debug, Error)]
pub enum ConvertError {
    /// No importer is registered under the requested name.
    #[error("importer '{0}' not found")]
    ImporterNotFound(String),

    /// No exporter is registered under the requested name.
    #[error("exporter '{0}' not found")]
    ExporterNotFound(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Run the conversion and return the output location.
///
/// Both capability lookups happen before any file is opened; an unresolved
/// name means the conversion never starts. Imports run concurrently but the
/// merged output keeps input-file order, and within a file the parser's
/// statement order.
pub async fn convert(
    inputs: &[PathBuf],
    importer_name: &str,
    exporter_name: &str,
    output: Option<PathBuf>,
) -> Result<PathBuf, ConvertError> {
    let importer = find_importer(importer_name)
        .ok_or_else(|| ConvertError::ImporterNotFound(importer_name.to_string()))?;
    let exporter = find_exporter(exporter_name)
        .ok_or_else(|| ConvertError::ExporterNotFound(exporter_name.to_string()))?;

    let per_file = try_join_all(inputs.iter().map(|path| importer.import(path))).await?;
    let transactions: Vec<CardTransaction> = per_file.into_iter().flatten().collect();
    tracing::info!(
        importer = importer.name(),
        files = inputs.len(),
        transactions = transactions.len(),
        "import finished"
    );

    let output = output.unwrap_or_else(|| default_output(inputs, exporter));
    exporter.export(&transactions, &output).await?;
    Ok(output)
}

fn default_output(inputs: &[PathBuf], exporter: Exporter) -> PathBuf {
    match inputs.first() {
        Some(first) => {
            let stem = first.file_stem().and_then(|s| s.to_str()).unwrap_or("statement");
            first.with_file_name(format!("{stem}_output{}", exporter.file_extension()))
        }
        None => PathBuf::from(format!("output{}", exporter.file_extension())),
    }
}
