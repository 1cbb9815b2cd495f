//! Pipeline configuration and the end-to-end run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::input::{self, Format, SourceMetadata};
use crate::output;
use crate::region::Region;
use crate::transform::{TransformReport, Transformer};

/// Name of the raw Eurostat extract.
pub const DEFAULT_INPUT_FILE: &str = "eu_life_expectancy_raw.tsv";

/// Directory used for input and output when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the raw file.
    pub input_dir: PathBuf,
    /// Directory receiving the tidy file.
    pub output_dir: PathBuf,
    /// Raw file name, relative to `input_dir`.
    pub filename: String,
    /// Explicit input format (None = from extension).
    pub format: Option<Format>,
    /// Keep only this region (None = all).
    pub region: Option<Region>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            filename: DEFAULT_INPUT_FILE.to_string(),
            format: None,
            region: None,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration with default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input directory.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the raw file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Force an input format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Filter to a single region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    /// Filter to a region given by code; unknown codes are rejected here,
    /// before anything touches the filesystem.
    pub fn with_region_code(self, code: &str) -> Result<Self> {
        Ok(self.with_region(Region::get(code)?))
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// The file that was read.
    pub source: SourceMetadata,
    /// Row counts per stage.
    pub transform: TransformReport,
    /// Region filter applied, if any.
    pub region: Option<Region>,
    /// Where the tidy table was written.
    pub output_path: PathBuf,
    /// SHA-256 of the tidy file.
    pub output_hash: String,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
}

/// Load, clean and write a life expectancy table.
pub struct Pipeline {
    config: PipelineConfig,
    transformer: Transformer,
}

impl Pipeline {
    /// Create a pipeline for the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            transformer: Transformer::new(),
        }
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run load, transform and write once.
    ///
    /// Nothing is written unless the whole table was transformed successfully.
    pub fn run(&self) -> Result<PipelineReport> {
        let config = &self.config;

        let (table, source) = input::load(&config.input_dir, &config.filename, config.format)?;
        info!(
            file = %source.path.display(),
            format = %source.format,
            rows = source.row_count,
            columns = source.column_count,
            hash = %source.hash,
            "loaded raw table"
        );

        let (tidy, transform) = self.transformer.transform(table, config.region)?;
        let written = output::write(&config.output_dir, &tidy, config.region)?;

        Ok(PipelineReport {
            source,
            transform,
            region: config.region,
            output_path: written.path,
            output_hash: written.hash,
            completed_at: Utc::now(),
        })
    }
}
