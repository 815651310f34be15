//! Akbank credit-card statement parser (semicolon-delimited CSV)
//!
//! Akbank exports are windows-1254 encoded. Expected layout:
//!
//!   Kart Türü / No:;Axess Card / **** **** **** 1234;
//!   ...header noise...
//!   Tarih;Açıklama;Tutar;Chip Para / Mil;
//!   8.07.2025;MARKET  ISTANBUL  TR;65,00 TL;0 TL / 0;
//!   ;      SUPERMARKET;0,00 TL;0 TL / 0;
//!   ...footer lines without semicolons
//!
//! Rows with an empty date column are category section markers; their label
//! applies to every transaction row until the next marker.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use chrono::NaiveDate;
use encoding_rs::WINDOWS_1254;
use regex::Regex;

use ekstre_core::currency::Currency;
use ekstre_core::model::{Card, CardTransaction};
use ekstre_core::{lookup_country, lookup_currency};

use crate::error::ImportError;

pub const NAME: &str = "akbank-cc-csv-importer";
pub const BANK_NAME: &str = "Akbank T.A.Ş.";
pub const EXTENSIONS: &[&str] = &[".csv"];

/// Akbank is a Türkiye bank; transactions with no country token in the
/// description are assumed domestic.
const HOME_COUNTRY: &str = "TR";

// Card identity line, e.g. "Kart Türü / No:;Some Axes Card / **** **** **** 1234;"
static CARD_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^;]*;(?P<name>.+?) / [*\s]*(?P<last4>\d{4})\s*;").expect("valid regex")
});

pub async fn import(path: &Path) -> Result<Vec<CardTransaction>, ImportError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // windows-turkish, since Akbank seems to encode it in it for some reason
    let (text, _, _) = WINDOWS_1254.decode(&bytes);
    parse_statement(&text, path)
}

fn parse_statement(text: &str, path: &Path) -> Result<Vec<CardTransaction>, ImportError> {
    let lines: Vec<&str> = text.lines().collect();

    let card_line = lines.first().ok_or_else(|| ImportError::CardLine {
        reason: "empty statement".to_string(),
    })?;
    let card = Arc::new(parse_card_line(card_line)?);

    let header = lines
        .iter()
        .position(|line| line.starts_with("Tarih"))
        .ok_or_else(|| ImportError::HeaderNotFound { path: path.to_path_buf() })?;

    let mut transactions = Vec::new();
    let mut category: Option<String> = None;

    for (idx, line) in lines.iter().enumerate().skip(header + 1) {
        if !line.contains(';') {
            // trailing footer/signature lines end the body
            break;
        }
        let row = idx + 1;
        let columns: Vec<&str> = line.split(';').collect();
        if columns.len() < 4 {
            return Err(ImportError::MissingColumn { row, expected: 4 });
        }

        if columns[0].is_empty() {
            // category marker, e.g. ";      SUPERMARKET;0,00 TL;0 TL / 0;"
            // (the 0 TL part is empty data, not a section total)
            category = Some(columns[1].trim_start_matches(' ').to_string());
            continue;
        }

        transactions.push(parse_transaction(&columns, row, &card, category.as_deref())?);
    }

    tracing::debug!(
        transactions = transactions.len(),
        card = %card.name,
        "akbank statement parsed"
    );
    Ok(transactions)
}

// Schema of a transaction line: Tarih|Açıklama|Tutar|Chip Para / Mil
fn parse_transaction(
    columns: &[&str],
    row: usize,
    card: &Arc<Card>,
    category: Option<&str>,
) -> Result<CardTransaction, ImportError> {
    let date = parse_date(columns[0], row)?;
    let comment = columns[1];

    // a country code, when present, is the last token: "******  *****  TR"
    let country_token = comment.rsplit(' ').next().unwrap_or("");
    let country = lookup_country(country_token)
        .or_else(|| lookup_country(HOME_COUNTRY))
        .cloned();

    let amount_minor = parse_amount_minor(columns[2], row)?;
    let currency = parse_currency(columns[2]);

    Ok(CardTransaction {
        date,
        time: None,
        amount_minor,
        comment: comment.to_string(),
        currency,
        country,
        category: category.map(str::to_string),
        card: Arc::clone(card),
    })
}

// literal day.month.year, e.g. "8.07.2025"
fn parse_date(field: &str, row: usize) -> Result<NaiveDate, ImportError> {
    let invalid = || ImportError::InvalidDate { row, value: field.to_string() };

    let mut parts = field.split('.');
    let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

// The amount field looks like "-1.500,00 TL" or "65,00 TL", with an optional
// chip/mil sub-amount handled as a separate column. Only the leading numeric
// run counts; "." and "," are grouping/decimal separators.
fn parse_amount_minor(field: &str, row: usize) -> Result<i64, ImportError> {
    let leading = field.split(' ').next().unwrap_or("");
    let digits: String = leading.chars().filter(|c| *c != '.' && *c != ',').collect();
    digits
        .parse()
        .map_err(|_| ImportError::InvalidAmount { row, value: field.to_string() })
}

// The currency symbol is the trailing token of the amount field. Akbank
// abbreviates inconsistently, so an unknown symbol falls back to lira
// instead of failing the import.
fn parse_currency(amount_field: &str) -> Currency {
    let symbol = amount_field.rsplit(' ').next().unwrap_or("");
    match lookup_currency(symbol) {
        Some(currency) => currency.clone(),
        None => {
            tracing::warn!(symbol, "currency symbol not in table, assuming lira");
            Currency {
                code: "TRY".to_string(),
                symbol: "TL".to_string(),
                name: None,
                minor_unit_fractions: 2,
            }
        }
    }
}

fn parse_card_line(line: &str) -> Result<Card, ImportError> {
    let captures = CARD_LINE_RE.captures(line).ok_or_else(|| ImportError::CardLine {
        reason: format!("unexpected card line shape: '{line}'"),
    })?;

    Ok(Card {
        number_last4: Some(captures["last4"].to_string()),
        name: captures["name"].to_string(),
        card_type: None,
        issued_bank: BANK_NAME.to_string(),
    })
}
