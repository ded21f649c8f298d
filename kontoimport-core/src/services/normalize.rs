//! Row normalizer - export records to raw rows and transactions

use tracing::warn;

use crate::domain::{
    parse_date, parse_decimal, IngestError, RawRow, Transaction, DEFAULT_CURRENCY,
};
use crate::services::parser::ParsedRecord;

/// Candidate spellings per logical column, tried in order.
///
/// Some exports carry a mis-encoded `ä` in the recipient column, either as
/// UTF-8 read through a single-byte codepage or as a replacement character.
mod columns {
    pub const BOOKING_DATE: &[&str] = &["Buchung"];
    pub const VALUE_DATE: &[&str] = &["Wertstellungsdatum", "Valuta"];
    pub const COUNTERPARTY: &[&str] = &[
        "Auftraggeber/Empfänger",
        "Auftraggeber/EmpfÃ¤nger",
        "Auftraggeber/Empf\u{FFFD}nger",
    ];
    pub const BOOKING_TEXT: &[&str] = &["Buchungstext"];
    pub const PURPOSE: &[&str] = &["Verwendungszweck"];
    pub const BALANCE: &[&str] = &["Saldo"];
    pub const AMOUNT: &[&str] = &["Betrag"];

    /// Shared by both "Währung" columns regardless of how `ä` was decoded
    pub const CURRENCY_FRAGMENT: &str = "hrung";
}

/// Trimmed value of the first candidate column present, or `""`
fn lookup<'r>(record: &'r ParsedRecord, candidates: &[&str]) -> &'r str {
    candidates
        .iter()
        .find_map(|name| record.get(name))
        .map(str::trim)
        .unwrap_or("")
}

/// Both outputs of one valid row
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub raw: RawRow,
    pub transaction: Transaction,
}

/// Outputs of a whole file
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub raw_rows: Vec<RawRow>,
    pub transactions: Vec<Transaction>,
    pub errors: Vec<IngestError>,
}

/// Normalize one record.
///
/// Fails only on an invalid booking date or amount. The record's own
/// `row_index` is used for identity, so earlier skipped rows do not shift it.
pub fn normalize_record(
    source_file: &str,
    record: &ParsedRecord,
) -> std::result::Result<NormalizedRow, IngestError> {
    let row_index = record.row_index;

    let booking = lookup(record, columns::BOOKING_DATE);
    let value = lookup(record, columns::VALUE_DATE);
    let counterparty = lookup(record, columns::COUNTERPARTY);
    let booking_text = lookup(record, columns::BOOKING_TEXT);
    let purpose = lookup(record, columns::PURPOSE);
    let balance = lookup(record, columns::BALANCE);
    let amount_text = lookup(record, columns::AMOUNT);

    let currencies: Vec<&str> = record
        .values_containing(columns::CURRENCY_FRAGMENT)
        .into_iter()
        .map(str::trim)
        .collect();
    let currency_at = |i: usize| match currencies.get(i) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CURRENCY.to_string(),
    };
    let balance_currency = currency_at(0);
    let amount_currency = currency_at(1);

    let booking_date = parse_date(booking)
        .ok_or_else(|| IngestError::row(row_index, format!("invalid date '{}'", booking)))?;
    let amount = parse_decimal(amount_text)
        .ok_or_else(|| IngestError::row(row_index, format!("invalid amount '{}'", amount_text)))?;

    let mut transaction = Transaction::new(source_file, row_index, booking_date, amount);
    transaction.value_date = parse_date(value).unwrap_or(booking_date);
    transaction.currency = amount_currency.clone();
    transaction.counterparty = counterparty.to_string();
    transaction.memo = (if purpose.is_empty() { booking_text } else { purpose }).to_string();
    transaction.balance_after = parse_decimal(balance);

    let raw = RawRow {
        source_file: source_file.to_string(),
        row_index,
        booking_date: booking.to_string(),
        value_date: value.to_string(),
        counterparty: counterparty.to_string(),
        booking_text: booking_text.to_string(),
        purpose: purpose.to_string(),
        balance: balance.to_string(),
        balance_currency,
        amount: amount_text.to_string(),
        amount_currency,
    };

    Ok(NormalizedRow { raw, transaction })
}

/// Normalize every record of a file, collecting row errors
pub fn normalize_records(source_file: &str, records: &[ParsedRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in records {
        match normalize_record(source_file, record) {
            Ok(row) => {
                batch.raw_rows.push(row.raw);
                batch.transactions.push(row.transaction);
            }
            Err(error) => {
                if let IngestError::Row { row_index, error: cause } = &error {
                    warn!(source_file, row_index, "Skipping row: {}", cause);
                }
                batch.errors.push(error);
            }
        }
    }

    batch
}
