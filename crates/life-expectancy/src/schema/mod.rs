//! Column layout and tidy record types.

mod column;
mod table;

pub use column::{KEY_COLUMN, KEY_SEPARATOR, OUTPUT_COLUMNS, VALUE_COLUMN, YEAR_COLUMN};
pub use table::{TidyRecord, TidyTable};
