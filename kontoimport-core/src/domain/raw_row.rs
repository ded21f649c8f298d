//! Raw export row as it appeared in the source file

use serde::{Deserialize, Serialize};

/// One source row with the export's original string fields.
///
/// Keyed by `(source_file, row_index)` in the raw sink. Field names on the
/// wire follow the raw table's German column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub source_file: String,
    pub row_index: usize,
    #[serde(rename = "buchung")]
    pub booking_date: String,
    #[serde(rename = "wertstellungsdatum")]
    pub value_date: String,
    #[serde(rename = "auftraggeber_empfaenger")]
    pub counterparty: String,
    #[serde(rename = "buchungstext")]
    pub booking_text: String,
    #[serde(rename = "verwendungszweck")]
    pub purpose: String,
    #[serde(rename = "saldo")]
    pub balance: String,
    #[serde(rename = "saldo_waehrung")]
    pub balance_currency: String,
    #[serde(rename = "betrag")]
    pub amount: String,
    #[serde(rename = "betrag_waehrung")]
    pub amount_currency: String,
}
