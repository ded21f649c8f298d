//! Core domain entities
//!
//! Pure data structures and value parsers - no I/O.

pub mod identity;
pub mod locale;
mod raw_row;
pub mod result;
mod summary;
mod transaction;

pub use identity::make_id;
pub use locale::{parse_date, parse_decimal};
pub use raw_row::RawRow;
pub use summary::{FileStatus, FileSummary, IngestError, RunLog};
pub use transaction::{Transaction, DEFAULT_CURRENCY};
