//! Locale-formatted values from the bank export
//!
//! Amounts use `.` for thousands and `,` for decimals ("1.234,56"), dates
//! are written `DD.MM.YYYY`. Both parsers are total: bad input yields `None`.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Parse a German-formatted decimal such as `-1.234,56`.
///
/// Only digits, a leading sign, `.` group separators and at most one `,`
/// are accepted. A `.` after the decimal comma is rejected.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let s = text.trim();

    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    if unsigned.is_empty()
        || !unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let mut parts = unsigned.split(',');
    let integral = parts.next().unwrap_or("");
    let fraction = parts.next();
    if parts.next().is_some() {
        return None;
    }
    if let Some(fraction) = fraction {
        if fraction.contains('.') {
            return None;
        }
    }
    if !integral.chars().any(|c| c.is_ascii_digit())
        && !fraction.is_some_and(|f| f.chars().any(|c| c.is_ascii_digit()))
    {
        return None;
    }

    let cleaned = s.replace('.', "").replace(',', ".");
    cleaned.parse::<Decimal>().ok()
}

/// Parse a `DD.MM.YYYY` date with zero-padded fields.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'.' || bytes[5] != b'.' {
        return None;
    }

    let field = |range: std::ops::Range<usize>| -> Option<u32> {
        let part = &s[range];
        if part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse().ok()
        } else {
            None
        }
    };

    let day = field(0..2)?;
    let month = field(3..5)?;
    let year = field(6..10)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}
