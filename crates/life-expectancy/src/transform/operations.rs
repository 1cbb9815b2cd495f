//! Intermediate tables and bookkeeping for the cleaning stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stage of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformStage {
    /// Split the composite key into identifier columns.
    SplitKey,
    /// Wide to long.
    Unpivot,
    /// Parse year and value.
    Coerce,
    /// Remove rows without a numeric value.
    DropMissing,
    /// Keep a single region.
    FilterRegion,
}

impl TransformStage {
    /// Get a human-readable description of the stage.
    pub fn description(&self) -> &'static str {
        match self {
            TransformStage::SplitKey => "Split composite key into unit, sex, age, region",
            TransformStage::Unpivot => "Unpivot year columns into (year, value) rows",
            TransformStage::Coerce => "Parse year as integer and extract numeric value",
            TransformStage::DropMissing => "Drop rows with no numeric value",
            TransformStage::FilterRegion => "Keep rows matching the region filter",
        }
    }
}

impl fmt::Display for TransformStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformStage::SplitKey => "split_key",
            TransformStage::Unpivot => "unpivot",
            TransformStage::Coerce => "coerce",
            TransformStage::DropMissing => "drop_missing",
            TransformStage::FilterRegion => "filter_region",
        };
        f.write_str(name)
    }
}

/// Identifier fields of one wide row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFields {
    pub unit: String,
    pub sex: String,
    pub age: String,
    pub region: String,
}

/// Wide table after the composite key has been split.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitTable {
    /// Identifier fields, one entry per row.
    pub keys: Vec<KeyFields>,
    /// Year column labels, whitespace-stripped, in original order.
    pub year_columns: Vec<String>,
    /// Cells per row, aligned with `year_columns`.
    pub cells: Vec<Vec<String>>,
}

impl SplitTable {
    /// Number of wide rows.
    pub fn row_count(&self) -> usize {
        self.keys.len()
    }
}

/// One unpivoted row, still untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub key: KeyFields,
    pub year: String,
    pub value: String,
}

/// One unpivoted row after coercion; `value` is `None` when no number was found.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRow {
    pub key: KeyFields,
    pub year: i64,
    pub value: Option<f64>,
}

/// Row counts observed at each stage of a transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Wide rows read.
    pub input_rows: usize,
    /// Year columns unpivoted.
    pub year_columns: usize,
    /// Rows after unpivot (`input_rows * year_columns`).
    pub unpivoted_rows: usize,
    /// Rows dropped because the value had no numeric component.
    pub dropped_missing: usize,
    /// Rows removed by the region filter.
    pub filtered_out: usize,
    /// Rows in the tidy table.
    pub output_rows: usize,
}

impl TransformReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if every unpivoted row made it to the output.
    pub fn is_lossless(&self) -> bool {
        self.output_rows == self.unpivoted_rows
    }
}
