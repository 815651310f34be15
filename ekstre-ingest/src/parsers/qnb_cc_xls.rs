//! QNB credit-card statement parser (.xls workbook)
//!
//! The sheet interleaves several card blocks. Column E of a block's first
//! row carries the card label (marker token "KART"); the column-header row
//! ("İşlem Tarihi" in column B) sits somewhere above the first block and
//! declares which columns hold data. A block's transaction rows follow its
//! marker until the first row with a blank date cell.
//!
//! The workbook is flattened into a plain row/cell grid first; everything
//! after that is pure string work and testable without an .xls fixture.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use calamine::{Reader, Xls};
use chrono::NaiveDate;

use ekstre_core::model::{Card, CardTransaction};
use ekstre_core::{Currency, lookup_currency};

use crate::error::ImportError;

pub const NAME: &str = "qnb-cc-xls-importer";
pub const BANK_NAME: &str = "QNB Bank A.Ş.";
pub const EXTENSIONS: &[&str] = &[".xls"];

/// Column E, where the card label appears.
const MARKER_COLUMN: usize = 4;
/// Rows at the top of the sheet that may legitimately have an empty column E.
const PREAMBLE_ROWS: usize = 16;

pub async fn import(path: &Path) -> Result<Vec<CardTransaction>, ImportError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let spreadsheet_err = |message: String| ImportError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook =
        Xls::new(Cursor::new(bytes)).map_err(|e| spreadsheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_err("workbook has no sheets".to_string()))?
        .map_err(|e| spreadsheet_err(e.to_string()))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    parse_grid(&grid, path)
}

fn parse_grid(grid: &[Vec<String>], path: &Path) -> Result<Vec<CardTransaction>, ImportError> {
    let card_rows = find_card_rows(grid);
    if card_rows.is_empty() {
        return Err(ImportError::HeaderNotFound { path: path.to_path_buf() });
    }
    let columns = statement_columns(grid, card_rows[0])
        .ok_or_else(|| ImportError::HeaderNotFound { path: path.to_path_buf() })?;

    let mut transactions = Vec::new();
    for &marker in &card_rows {
        let card = Arc::new(parse_card_cell(cell(grid, marker, MARKER_COLUMN))?);
        transactions.extend(parse_block(grid, marker + 1, &columns, &card)?);
    }

    tracing::debug!(
        cards = card_rows.len(),
        transactions = transactions.len(),
        "qnb statement parsed"
    );
    Ok(transactions)
}

fn cell<'a>(grid: &'a [Vec<String>], row: usize, column: usize) -> &'a str {
    grid.get(row)
        .and_then(|r| r.get(column))
        .map(String::as_str)
        .unwrap_or("")
}

/// Rows whose marker cell carries a card label. The scan ends after two
/// consecutive empty marker cells once past the sheet preamble.
fn find_card_rows(grid: &[Vec<String>]) -> Vec<usize> {
    let mut rows = Vec::new();
    let mut empty_run = 0;

    for i in 0..grid.len() {
        let marker = cell(grid, i, MARKER_COLUMN);
        if marker.contains("KART") {
            rows.push(i);
        }
        if marker.is_empty() {
            empty_run += 1;
            if empty_run >= 2 && i > PREAMBLE_ROWS {
                break;
            }
        } else {
            empty_run = 0;
        }
    }
    rows
}

/// Indexes of the meaningful columns, read off the header row above the
/// first card block (its column B contains "Tarihi").
fn statement_columns(grid: &[Vec<String>], first_card_row: usize) -> Option<Vec<usize>> {
    let mut row = first_card_row;
    loop {
        if row == 0 {
            return None;
        }
        row -= 1;
        if cell(grid, row, 1).contains("Tarihi") {
            let columns: Vec<usize> = grid[row]
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_empty())
                .map(|(j, _)| j)
                .collect();
            return Some(columns);
        }
    }
}

fn parse_block(
    grid: &[Vec<String>],
    start: usize,
    columns: &[usize],
    card: &Arc<Card>,
) -> Result<Vec<CardTransaction>, ImportError> {
    let date_column = columns[0];
    let mut transactions = Vec::new();

    for i in start..grid.len() {
        if cell(grid, i, date_column).is_empty() {
            break;
        }
        let cells: Vec<&str> = columns.iter().map(|&j| cell(grid, i, j)).collect();
        transactions.push(parse_row(&cells, i + 1, card)?);
    }
    Ok(transactions)
}

fn parse_row(cells: &[&str], row: usize, card: &Arc<Card>) -> Result<CardTransaction, ImportError> {
    if cells.len() < 3 {
        return Err(ImportError::MissingColumn { row, expected: 3 });
    }

    let date = parse_date(cells[0], row)?;
    let comment = cells[1];
    let (amount_minor, currency) = parse_amount(cells[2], row)?;

    Ok(CardTransaction {
        date,
        time: None,
        amount_minor,
        comment: comment.to_string(),
        currency,
        // QNB statements carry no country hint; left absent rather than guessed
        country: None,
        category: None,
        card: Arc::clone(card),
    })
}

// literal dd/mm/yyyy, e.g. "16/06/2025"
fn parse_date(field: &str, row: usize) -> Result<NaiveDate, ImportError> {
    let invalid = || ImportError::InvalidDate { row, value: field.to_string() };

    let mut parts = field.split('/');
    let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

// "1.234,56 TL": numeric run up to the trailing symbol token, separators
// stripped. Unlike Akbank, an unknown symbol fails the import here; QNB
// prints the symbol consistently, so a miss means the row is not what this
// parser thinks it is.
fn parse_amount(field: &str, row: usize) -> Result<(i64, Currency), ImportError> {
    let (number, symbol) = field
        .rsplit_once(' ')
        .ok_or_else(|| ImportError::InvalidAmount { row, value: field.to_string() })?;

    let currency = lookup_currency(symbol)
        .cloned()
        .ok_or_else(|| ImportError::UnknownCurrency { row, symbol: symbol.to_string() })?;

    let digits: String = number
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' '))
        .collect();
    let amount_minor = digits
        .parse()
        .map_err(|_| ImportError::InvalidAmount { row, value: field.to_string() })?;

    Ok((amount_minor, currency))
}

// Card label cell, e.g. "GOLD KART - **** **** **** 5678": name before the
// dash (one trailing separator char dropped), last 4 digits anywhere after.
fn parse_card_cell(info: &str) -> Result<Card, ImportError> {
    if !info.contains("KART") {
        return Err(ImportError::CardLine { reason: format!("unexpected card cell: '{info}'") });
    }

    let name = info.split('-').next().unwrap_or(info).trim_end();
    let digits: String = info.chars().filter(char::is_ascii_digit).collect();
    let number_last4 = if digits.len() >= 4 {
        Some(digits[digits.len() - 4..].to_string())
    } else {
        None
    };

    Ok(Card {
        number_last4,
        name: name.to_string(),
        card_type: None,
        issued_bank: BANK_NAME.to_string(),
    })
}
