//! Column names shared by the raw and tidy tables.

/// Header of the composite key column in the raw dataset.
pub const KEY_COLUMN: &str = "unit,sex,age,geo\\time";

/// Separator between the fields of the composite key.
pub const KEY_SEPARATOR: char = ',';

/// Name of the column holding the former wide-table headers.
pub const YEAR_COLUMN: &str = "year";

/// Name of the column holding the observation.
pub const VALUE_COLUMN: &str = "value";

/// Header of the tidy output, in order.
pub const OUTPUT_COLUMNS: [&str; 6] = ["unit", "sex", "age", "region", YEAR_COLUMN, VALUE_COLUMN];
