//! Cleaning engine: wide raw table in, tidy table out.
//!
//! Stages run in a fixed order: split key, unpivot, coerce, drop missing,
//! filter region. Each stage is a public function so it can be exercised on
//! its own; [`Transformer::transform`] chains them.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{LifeExpectancyError, Result};
use crate::input::RawTable;
use crate::region::Region;
use crate::schema::{KEY_COLUMN, KEY_SEPARATOR, TidyRecord, TidyTable, YEAR_COLUMN};

use super::operations::{
    KeyFields, LongRow, SplitTable, TransformReport, TransformStage, TypedRow,
};

/// Plain unsigned decimal: digits, a point, digits.
static VALUE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.[0-9]+").unwrap());

/// Engine for turning the raw wide table into tidy records.
pub struct Transformer;

impl Transformer {
    /// Create a new transformer.
    pub fn new() -> Self {
        Self
    }

    /// Run every stage and report the row counts along the way.
    pub fn transform(
        &self,
        table: RawTable,
        region: Option<Region>,
    ) -> Result<(TidyTable, TransformReport)> {
        let mut report = TransformReport::new();
        report.input_rows = table.row_count();

        let split = split_key_column(table)?;
        report.year_columns = split.year_columns.len();
        log_stage(TransformStage::SplitKey, report.year_columns);

        let long = unpivot(split);
        report.unpivoted_rows = long.len();
        log_stage(TransformStage::Unpivot, report.unpivoted_rows);

        let typed = coerce_types(long)?;
        log_stage(TransformStage::Coerce, typed.len());

        let (complete, dropped) = drop_missing_values(typed);
        report.dropped_missing = dropped;
        log_stage(TransformStage::DropMissing, dropped);

        let (records, filtered_out) = filter_region(complete, region);
        report.filtered_out = filtered_out;
        log_stage(TransformStage::FilterRegion, filtered_out);

        let tidy = TidyTable::new(records);
        report.output_rows = tidy.len();

        info!(
            input_rows = report.input_rows,
            year_columns = report.year_columns,
            dropped_missing = report.dropped_missing,
            filtered_out = report.filtered_out,
            output_rows = report.output_rows,
            region = region.map(|r| r.as_str()).unwrap_or("all"),
            "transformed table"
        );

        Ok((tidy, report))
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

fn log_stage(stage: TransformStage, count: usize) {
    debug!(%stage, count, "{}", stage.description());
}

/// Clean `table` into tidy records, optionally keeping a single region.
pub fn transform(table: RawTable, region: Option<Region>) -> Result<TidyTable> {
    Transformer::new()
        .transform(table, region)
        .map(|(tidy, _)| tidy)
}

/// Split the composite key into its four fields and strip the remaining headers.
pub fn split_key_column(table: RawTable) -> Result<SplitTable> {
    let key_idx = table
        .column_index(KEY_COLUMN)
        .ok_or_else(|| LifeExpectancyError::MissingColumn(KEY_COLUMN.to_string()))?;

    let year_columns: Vec<String> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != key_idx)
        .map(|(_, h)| h.trim().to_string())
        .collect();

    let mut keys = Vec::with_capacity(table.row_count());
    let mut cells = Vec::with_capacity(table.row_count());

    for (row_idx, mut row) in table.rows.into_iter().enumerate() {
        let key = if key_idx < row.len() {
            row.remove(key_idx)
        } else {
            String::new()
        };
        keys.push(split_key(row_idx, &key)?);
        cells.push(row);
    }

    Ok(SplitTable {
        keys,
        year_columns,
        cells,
    })
}

fn split_key(row: usize, key: &str) -> Result<KeyFields> {
    let parts: Vec<&str> = key.split(KEY_SEPARATOR).collect();
    match parts.as_slice() {
        [unit, sex, age, region] => Ok(KeyFields {
            unit: unit.to_string(),
            sex: sex.to_string(),
            age: age.to_string(),
            region: region.to_string(),
        }),
        _ => Err(LifeExpectancyError::MalformedKey {
            row,
            key: key.to_string(),
            fields: parts.len(),
        }),
    }
}

/// Wide to long: all rows of the first year column, then the second, and so on.
pub fn unpivot(table: SplitTable) -> Vec<LongRow> {
    let mut rows = Vec::with_capacity(table.row_count() * table.year_columns.len());

    for (col_idx, year) in table.year_columns.iter().enumerate() {
        for (key, cells) in table.keys.iter().zip(&table.cells) {
            rows.push(LongRow {
                key: key.clone(),
                year: year.clone(),
                value: cells.get(col_idx).cloned().unwrap_or_default(),
            });
        }
    }

    rows
}

/// Parse every year strictly and extract every value leniently.
pub fn coerce_types(rows: Vec<LongRow>) -> Result<Vec<TypedRow>> {
    rows.into_iter()
        .map(|row| {
            let year = row.year.parse::<i64>().map_err(|_| {
                LifeExpectancyError::TypeCoercion {
                    column: YEAR_COLUMN.to_string(),
                    value: row.year.clone(),
                }
            })?;
            let value = extract_value(&row.value);
            Ok(TypedRow {
                key: row.key,
                year,
                value,
            })
        })
        .collect()
}

/// First plain decimal number in `raw`, ignoring flags and other text.
///
/// Returns `None` when the cell holds no such number (`":"`, `"-"`, `""`,
/// integers without a fractional part).
pub fn extract_value(raw: &str) -> Option<f64> {
    VALUE_PATTERN
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Remove rows whose value is missing; returns survivors and the number dropped.
pub fn drop_missing_values(rows: Vec<TypedRow>) -> (Vec<TidyRecord>, usize) {
    let total = rows.len();
    let records: Vec<TidyRecord> = rows
        .into_iter()
        .filter_map(|row| {
            row.value.map(|value| TidyRecord {
                unit: row.key.unit,
                sex: row.key.sex,
                age: row.key.age,
                region: row.key.region,
                year: row.year,
                value,
            })
        })
        .collect();
    let dropped = total - records.len();
    (records, dropped)
}

/// Keep records whose region equals the filter; no filter keeps everything.
pub fn filter_region(records: Vec<TidyRecord>, region: Option<Region>) -> (Vec<TidyRecord>, usize) {
    let Some(region) = region else {
        return (records, 0);
    };

    let total = records.len();
    let kept: Vec<TidyRecord> = records.into_iter().filter(|r| r.is_in(region)).collect();
    let removed = total - kept.len();
    (kept, removed)
}
