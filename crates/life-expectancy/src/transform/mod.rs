//! Cleaning pipeline from the raw wide table to tidy records.

mod engine;
mod operations;

pub use engine::{
    Transformer, coerce_types, drop_missing_values, extract_value, filter_region,
    split_key_column, transform, unpivot,
};
pub use operations::{
    KeyFields, LongRow, SplitTable, TransformReport, TransformStage, TypedRow,
};
