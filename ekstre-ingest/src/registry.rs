//! Importer registry: a fixed enumeration of bank parsers, dispatched by
//! name. Adding a bank means adding a variant here plus its module under
//! `parsers/`.

use std::path::Path;

use ekstre_core::model::CardTransaction;

use crate::error::ImportError;
use crate::parsers::{akbank_cc_csv, qnb_cc_xls};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importer {
    AkbankCcCsv,
    QnbCcXls,
}

impl Importer {
    /// Unique key used for `--importer` selection.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AkbankCcCsv => akbank_cc_csv::NAME,
            Self::QnbCcXls => qnb_cc_xls::NAME,
        }
    }

    /// Display name of the bank whose statements this importer reads.
    pub fn bank_name(&self) -> &'static str {
        match self {
            Self::AkbankCcCsv => akbank_cc_csv::BANK_NAME,
            Self::QnbCcXls => qnb_cc_xls::BANK_NAME,
        }
    }

    pub fn supported_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::AkbankCcCsv => akbank_cc_csv::EXTENSIONS,
            Self::QnbCcXls => qnb_cc_xls::EXTENSIONS,
        }
    }

    /// Parse one statement file into transactions, in statement order.
    pub async fn import(&self, path: &Path) -> Result<Vec<CardTransaction>, ImportError> {
        match self {
            Self::AkbankCcCsv => akbank_cc_csv::import(path).await,
            Self::QnbCcXls => qnb_cc_xls::import(path).await,
        }
    }
}

pub const ALL_IMPORTERS: &[Importer] = &[Importer::AkbankCcCsv, Importer::QnbCcXls];

/// Exact-name lookup. `None` is a reportable condition for the caller, not
/// a panic.
pub fn find_importer(name: &str) -> Option<Importer> {
    ALL_IMPORTERS.iter().find(|i| i.name() == name).copied()
}

/// Every importer, ordered by name for deterministic listings.
pub fn list_importers() -> Vec<Importer> {
    let mut importers = ALL_IMPORTERS.to_vec();
    importers.sort_by_key(|i| i.name());
    importers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_exact_name() {
        assert_eq!(find_importer("akbank-cc-csv-importer"), Some(Importer::AkbankCcCsv));
        assert_eq!(find_importer("qnb-cc-xls-importer"), Some(Importer::QnbCcXls));
    }

    #[test]
    fn test_find_is_exact_not_fuzzy() {
        assert_eq!(find_importer("akbank"), None);
        assert_eq!(find_importer("AKBANK-CC-CSV-IMPORTER"), None);
        assert_eq!(find_importer(""), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ALL_IMPORTERS.iter().map(|i| i.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL_IMPORTERS.len());
    }

    #[test]
    fn test_listing_is_ordered_by_name() {
        let names: Vec<_> = list_importers().iter().map(|i| i.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_capability_surface() {
        let akbank = Importer::AkbankCcCsv;
        assert_eq!(akbank.bank_name(), "Akbank T.A.Ş.");
        assert_eq!(akbank.supported_extensions(), &[".csv"]);
        let qnb = Importer::QnbCcXls;
        assert_eq!(qnb.bank_name(), "QNB Bank A.Ş.");
        assert_eq!(qnb.supported_extensions(), &[".xls"]);
    }
}
