//! Life expectancy: reshape the Eurostat life expectancy extract into tidy records.
//!
//! The raw file is wide: one row per unit/sex/age/region combination packed
//! into a single `unit,sex,age,geo\time` column, and one column per year whose
//! cells carry annotation flags (`"75.4 b"`, `":"`). This crate turns it into
//! one row per combination and year with a numeric value.
//!
//! # Pipeline
//!
//! 1. **Load** the raw table ([`input`]), delimited text or JSON records
//! 2. **Transform** it ([`transform`]): split key, unpivot, coerce, drop
//!    missing values, filter by [`Region`]
//! 3. **Write** the tidy CSV ([`output`])
//!
//! # Example
//!
//! ```no_run
//! use life_expectancy::{Pipeline, PipelineConfig, Region};
//!
//! let config = PipelineConfig::new().with_region(Region::PT);
//! let report = Pipeline::new(config).run().unwrap();
//!
//! println!("Rows written: {}", report.transform.output_rows);
//! println!("Output: {}", report.output_path.display());
//! ```

pub mod error;
pub mod input;
pub mod output;
pub mod region;
pub mod schema;
pub mod transform;

mod pipeline;

pub use error::{LifeExpectancyError, LoadCause, Result};
pub use input::{Format, Loader, RawTable, SourceMetadata};
pub use pipeline::{DEFAULT_DATA_DIR, DEFAULT_INPUT_FILE, Pipeline, PipelineConfig, PipelineReport};
pub use region::Region;
pub use schema::{TidyRecord, TidyTable};
pub use transform::{TransformReport, Transformer, transform};
