//! Exporter registry, mirroring the importer registry's enum dispatch.

use std::path::Path;

use ekstre_core::model::CardTransaction;

use crate::csv_full;
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exporter {
    CsvFull,
}

impl Exporter {
    /// Unique key used for `--exporter` selection.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CsvFull => csv_full::NAME,
        }
    }

    /// Extension of the produced file, dot included.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::CsvFull => csv_full::FILE_EXTENSION,
        }
    }

    /// Whether the produced format is text-based.
    pub fn is_text(&self) -> bool {
        match self {
            Self::CsvFull => csv_full::IS_TEXT,
        }
    }

    /// Write the merged transaction sequence to `path`.
    pub async fn export(
        &self,
        transactions: &[CardTransaction],
        path: &Path,
    ) -> Result<(), ExportError> {
        match self {
            Self::CsvFull => csv_full::export(transactions, path).await,
        }
    }
}

pub const ALL_EXPORTERS: &[Exporter] = &[Exporter::CsvFull];

/// Exact-name lookup; `None` is the caller's reportable condition.
pub fn find_exporter(name: &str) -> Option<Exporter> {
    ALL_EXPORTERS.iter().find(|e| e.name() == name).copied()
}

/// Every exporter, ordered by name for deterministic listings.
pub fn list_exporters() -> Vec<Exporter> {
    let mut exporters = ALL_EXPORTERS.to_vec();
    exporters.sort_by_key(|e| e.name());
    exporters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_exact_name() {
        assert_eq!(find_exporter("csv-exporter-full"), Some(Exporter::CsvFull));
        assert_eq!(find_exporter("csv"), None);
        assert_eq!(find_exporter(""), None);
    }

    #[test]
    fn test_capability_surface() {
        let csv = Exporter::CsvFull;
        assert_eq!(csv.name(), "csv-exporter-full");
        assert_eq!(csv.file_extension(), ".csv");
        assert!(csv.is_text());
    }

    #[test]
    fn test_listing_is_ordered_by_name() {
        let names: Vec<_> = list_exporters().iter().map(|e| e.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
