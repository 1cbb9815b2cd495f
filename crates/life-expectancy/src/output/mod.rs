//! Serialization of tidy tables.

mod writer;

pub use writer::{
    DEFAULT_OUTPUT_FILE, REGION_OUTPUT_SUFFIX, WrittenFile, output_filename, to_csv_bytes, write,
};
