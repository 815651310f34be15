//! Canonical transaction model populated by the bank parsers.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::country::Country;
use crate::currency::Currency;

/// Kind of card a statement belongs to. Statements rarely say, so it is
/// usually left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Credit,
    Debit,
    Prepaid,
}

/// The physical card a statement was issued for. Built once per statement
/// (or per card block, for multi-card spreadsheets) and shared by every
/// transaction parsed from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Last 4 digits; the rest is redacted on the statement.
    pub number_last4: Option<String>,
    /// Display name as printed on the statement header.
    pub name: String,
    pub card_type: Option<CardType>,
    /// Display name of the issuing bank.
    pub issued_bank: String,
}

/// Normalized output of statement parsers (bank-agnostic).
#[derive(Debug, Clone, PartialEq)]
pub struct CardTransaction {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// Signed amount in minor currency units (kuruş, cents). Positive is a
    /// charge (outflow), negative is a credit or refund (inflow).
    pub amount_minor: i64,
    /// Free-text description, verbatim from the statement.
    pub comment: String,
    pub currency: Currency,
    /// Absent when the description carries no recognizable country token and
    /// the bank's parser does not assume a home country.
    pub country: Option<Country>,
    /// Section label attributed from the nearest preceding category row.
    pub category: Option<String>,
    pub card: Arc<Card>,
}

impl CardTransaction {
    /// Credited minor units (refunds, payments into the card). Zero for charges.
    pub fn inflow_minor(&self) -> i64 {
        if self.amount_minor < 0 { -self.amount_minor } else { 0 }
    }

    /// Charged minor units. Zero for credits.
    pub fn outflow_minor(&self) -> i64 {
        if self.amount_minor > 0 { self.amount_minor } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::lookup_currency;

    fn card() -> Arc<Card> {
        Arc::new(Card {
            number_last4: Some("1234".to_string()),
            name: "Test Card".to_string(),
            card_type: Some(CardType::Credit),
            issued_bank: "Test Bank".to_string(),
        })
    }

    fn transaction(amount_minor: i64) -> CardTransaction {
        CardTransaction {
            date: NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(),
            time: None,
            amount_minor,
            comment: "MARKET".to_string(),
            currency: lookup_currency("TRY").unwrap().clone(),
            country: None,
            category: None,
            card: card(),
        }
    }

    #[test]
    fn test_positive_amount_is_outflow() {
        let tx = transaction(6500);
        assert_eq!(tx.outflow_minor(), 6500);
        assert_eq!(tx.inflow_minor(), 0);
    }

    #[test]
    fn test_negative_amount_is_inflow() {
        let tx = transaction(-13360);
        assert_eq!(tx.inflow_minor(), 13360);
        assert_eq!(tx.outflow_minor(), 0);
    }

    #[test]
    fn test_card_is_shared_not_copied() {
        let card = card();
        let a = CardTransaction { card: Arc::clone(&card), ..transaction(100) };
        let b = CardTransaction { card: Arc::clone(&card), ..transaction(200) };
        assert!(Arc::ptr_eq(&a.card, &b.card));
    }
}
