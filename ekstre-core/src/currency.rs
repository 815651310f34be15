//! ISO 4217 currency reference table.
//!
//! The table is embedded at compile time and deserialized once on first use.
//! Failure to parse the seed is a build artifact problem, not a runtime
//! condition, and aborts the process.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// One currency from the reference table. Value semantics: two currencies
/// are equal when all fields match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 alphabetic code, e.g. "TRY".
    #[serde(default)]
    pub code: String,
    /// Symbol as it appears on statements, e.g. "TL".
    pub symbol: String,
    pub name: Option<String>,
    /// Number of decimal places of the minor unit.
    #[serde(rename = "ISOdigits")]
    pub minor_unit_fractions: u8,
}

// Seed keyed by currency code, same shape as the upstream dataset
// (https://github.com/ourworldincode/currency).
static CURRENCIES: LazyLock<Vec<Currency>> = LazyLock::new(|| {
    let seed: BTreeMap<String, Currency> =
        serde_json::from_str(include_str!("../seeds/currencies.json"))
            .expect("embedded currency seed is valid JSON");
    seed.into_iter()
        .map(|(code, currency)| Currency { code, ..currency })
        .collect()
});

/// Case-sensitive exact match against currency code or symbol.
pub fn lookup_currency(code_or_symbol: &str) -> Option<&'static Currency> {
    CURRENCIES
        .iter()
        .find(|c| c.code == code_or_symbol || c.symbol == code_or_symbol)
}

/// The full table, ordered by code.
pub fn currencies() -> &'static [Currency] {
    &CURRENCIES
}
