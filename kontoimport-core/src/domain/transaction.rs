//! Transaction domain model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::identity::make_id;

/// Currency assumed when the export omits one
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A canonical financial event derived from one export row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// SHA-256 of source file and row index, see [`make_id`]
    pub transaction_id: String,
    pub source_file: String,
    pub booking_date: NaiveDate,
    /// Falls back to `booking_date` when the export value is missing or invalid
    pub value_date: NaiveDate,
    /// Signed amount, negative for debits
    pub amount: Decimal,
    pub currency: String,
    pub counterparty: String,
    pub memo: String,
    /// Tags for later categorization, empty on import
    pub tags: Vec<String>,
    /// Running balance after this booking, when the export carries one
    pub balance_after: Option<Decimal>,
    /// Row index in the raw sink this transaction was built from
    pub raw_row_index: usize,
}

impl Transaction {
    /// Create a transaction with its identity derived from provenance
    pub fn new(
        source_file: &str,
        row_index: usize,
        booking_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_id: make_id(source_file, row_index),
            source_file: source_file.to_string(),
            booking_date,
            value_date: booking_date,
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            counterparty: String::new(),
            memo: String::new(),
            tags: Vec::new(),
            balance_after: None,
            raw_row_index: row_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transaction_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let tx = Transaction::new("a.csv", 1, date, Decimal::new(-4250, 2));

        assert_eq!(tx.transaction_id, make_id("a.csv", 1));
        assert_eq!(tx.value_date, date);
        assert_eq!(tx.currency, "EUR");
        assert!(tx.tags.is_empty());
        assert_eq!(tx.raw_row_index, 1);
    }

    #[test]
    fn test_wire_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        let mut tx = Transaction::new("a.csv", 0, date, Decimal::new(123456, 2));
        tx.balance_after = Some(Decimal::new(-50, 0));

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["booking_date"], "2024-03-21");
        assert_eq!(json["value_date"], "2024-03-21");
        assert_eq!(json["amount"], "1234.56");
        assert_eq!(json["balance_after"], "-50");
        assert_eq!(json["tags"], serde_json::json!([]));
    }
}
