//! ISO 3166 country reference table, embedded and lazily built like the
//! currency table.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// One country from the reference table. Value semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Lowercase alpha-2 code as shipped in the seed dataset.
    pub alpha2: String,
    pub alpha3: String,
    /// ISO 3166 numeric code.
    #[serde(rename = "id")]
    pub numeric: u16,
    /// English short name.
    pub name: String,
}

// Seed shape follows the upstream dataset
// (https://github.com/stefangabos/world_countries).
static COUNTRIES: LazyLock<Vec<Country>> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../seeds/countries.json"))
        .expect("embedded country seed is valid JSON")
});

/// Case-insensitive match against alpha-2 or alpha-3 code.
pub fn lookup_country(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.alpha2.eq_ignore_ascii_case(code) || c.alpha3.eq_ignore_ascii_case(code))
}

/// The full table, in seed order (ascending numeric code).
pub fn countries() -> &'static [Country] {
    &COUNTRIES
}
