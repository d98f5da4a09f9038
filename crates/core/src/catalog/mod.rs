//! Catalog records and the table they are served from.

mod field;
mod record;
mod table;

pub use field::Field;
pub use record::{parse_year, Record};
pub use table::{RecordTable, TableOptions};
