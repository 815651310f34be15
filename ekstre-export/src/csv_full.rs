//! Full CSV exporter: one row per transaction, sub-objects flattened with a
//! header prefix matching the parent field (`Currency.Symbol`, `Card.Name`).
//!
//! Amounts are written as the inflow/outflow split, scaled by the currency's
//! minor-unit fraction count. The formatting is plain integer arithmetic, so
//! exporting and re-reading a statement preserves sums exactly.

use std::path::Path;

use ekstre_core::model::{CardTransaction, CardType};

use crate::error::ExportError;

pub const NAME: &str = "csv-exporter-full";
pub const FILE_EXTENSION: &str = ".csv";
pub const IS_TEXT: bool = true;

const HEADERS: &[&str] = &[
    "TransactionDate",
    "TransactionTime",
    "Inflow",
    "Outflow",
    "Comment",
    "Category",
    "Currency.Code",
    "Currency.Symbol",
    "Currency.Name",
    "Currency.MinorUnitFractions",
    "Country.Alpha2",
    "Country.Alpha3",
    "Country.Numeric",
    "Country.Name",
    "Card.NumberLast4",
    "Card.Name",
    "Card.Type",
    "Card.IssuedBank",
];

/// Render and write the whole output with a single write, so a failed or
/// cancelled conversion leaves no partial file behind.
pub async fn export(transactions: &[CardTransaction], path: &Path) -> Result<(), ExportError> {
    let buffer = render(transactions)?;
    tokio::fs::write(path, buffer).await.map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(transactions = transactions.len(), path = %path.display(), "csv written");
    Ok(())
}

/// One forward pass over the merged transaction sequence.
pub fn render(transactions: &[CardTransaction]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for transaction in transactions {
        writer.write_record(record(transaction))?;
    }
    writer.into_inner().map_err(|e| ExportError::Buffer(e.to_string()))
}

fn record(tx: &CardTransaction) -> Vec<String> {
    let fractions = tx.currency.minor_unit_fractions;
    let (country_alpha2, country_alpha3, country_numeric, country_name) = match &tx.country {
        Some(c) => (c.alpha2.clone(), c.alpha3.clone(), c.numeric.to_string(), c.name.clone()),
        None => Default::default(),
    };

    vec![
        tx.date.format("%Y-%m-%d").to_string(),
        tx.time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default(),
        format_minor(tx.inflow_minor(), fractions),
        format_minor(tx.outflow_minor(), fractions),
        tx.comment.clone(),
        tx.category.clone().unwrap_or_default(),
        tx.currency.code.clone(),
        tx.currency.symbol.clone(),
        tx.currency.name.clone().unwrap_or_default(),
        fractions.to_string(),
        country_alpha2,
        country_alpha3,
        country_numeric,
        country_name,
        tx.card.number_last4.clone().unwrap_or_default(),
        tx.card.name.clone(),
        tx.card.card_type.map(card_type_label).unwrap_or_default().to_string(),
        tx.card.issued_bank.clone(),
    ]
}

fn card_type_label(card_type: CardType) -> &'static str {
    match card_type {
        CardType::Credit => "Credit",
        CardType::Debit => "Debit",
        CardType::Prepaid => "Prepaid",
    }
}

// 13360 with 2 fraction digits -> "133.60"; 0 fraction digits pass through.
fn format_minor(minor: i64, fractions: u8) -> String {
    if fractions == 0 {
        return minor.to_string();
    }
    let scale = 10i64.pow(u32::from(fractions));
    format!("{}.{:0width$}", minor / scale, minor % scale, width = usize::from(fractions))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveTime};
    use ekstre_core::model::Card;
    use ekstre_core::{lookup_country, lookup_currency};

    use super::*;

    fn card() -> Arc<Card> {
        Arc::new(Card {
            number_last4: Some("1234".to_string()),
            name: "Axess Card".to_string(),
            card_type: None,
            issued_bank: "Akbank T.A.Ş.".to_string(),
        })
    }

    fn transaction(amount_minor: i64) -> CardTransaction {
        CardTransaction {
            date: NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(),
            time: None,
            amount_minor,
            comment: "MARKET ISTANBUL TR".to_string(),
            category: Some("SUPERMARKET".to_string()),
            currency: lookup_currency("TRY").unwrap().clone(),
            country: lookup_country("TR").cloned(),
            card: card(),
        }
    }

    #[test]
    fn test_format_minor() {
        assert_eq!(format_minor(6500, 2), "65.00");
        assert_eq!(format_minor(13360, 2), "133.60");
        assert_eq!(format_minor(5, 2), "0.05");
        assert_eq!(format_minor(1500, 3), "1.500");
        assert_eq!(format_minor(42, 0), "42");
        assert_eq!(format_minor(0, 2), "0.00");
    }

    #[test]
    fn test_render_golden_row() {
        let output = render(&[transaction(6500)]).unwrap();
        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "TransactionDate,TransactionTime,Inflow,Outflow,Comment,Category,\
             Currency.Code,Currency.Symbol,Currency.Name,Currency.MinorUnitFractions,\
             Country.Alpha2,Country.Alpha3,Country.Numeric,Country.Name,\
             Card.NumberLast4,Card.Name,Card.Type,Card.IssuedBank"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-07-08,,0.00,65.00,MARKET ISTANBUL TR,SUPERMARKET,\
             TRY,TL,Turkish lira,2,tr,tur,792,Türkiye,1234,Axess Card,,Akbank T.A.Ş."
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_negative_amount_lands_in_inflow_column() {
        let output = render(&[transaction(-13360)]).unwrap();
        let text = String::from_utf8(output).unwrap();
        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields[2], "133.60"); // inflow
        assert_eq!(fields[3], "0.00"); // outflow
    }

    #[test]
    fn test_optional_fields_render_empty() {
        let mut tx = transaction(100);
        tx.time = Some(NaiveTime::from_hms_opt(14, 30, 5).unwrap());
        tx.country = None;
        tx.category = None;
        let output = render(&[tx]).unwrap();
        let text = String::from_utf8(output).unwrap();
        let fields: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields[1], "14:30:05");
        assert_eq!(fields[5], ""); // category
        assert_eq!(fields[10], ""); // country columns
        assert_eq!(fields[13], "");
    }

    #[test]
    fn test_export_reimport_preserves_signed_sum() {
        let txns = vec![
            transaction(6500),
            transaction(-13360),
            transaction(150000),
            transaction(-1),
        ];
        let expected: i64 = txns.iter().map(|t| t.amount_minor).sum();

        let output = render(&txns).unwrap();
        let mut reader = csv::Reader::from_reader(output.as_slice());
        let mut total = 0i64;
        for result in reader.records() {
            let row = result.unwrap();
            let inflow = decimal_to_minor(row.get(2).unwrap());
            let outflow = decimal_to_minor(row.get(3).unwrap());
            total += outflow - inflow;
        }
        assert_eq!(total, expected);
    }

    fn decimal_to_minor(field: &str) -> i64 {
        field.replace('.', "").parse().unwrap()
    }
}
