//! File loaders for the raw wide table.
//!
//! Loading is polymorphic over [`Loader`]; [`Format`] picks the variant from
//! an explicit hint or the file extension.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{RawTable, SourceMetadata};
use crate::error::{LifeExpectancyError, LoadCause, Result};

/// Loads a raw table from `dir/filename`.
pub trait Loader {
    /// Read the file and return its table with source metadata.
    fn load(&self, dir: &Path, filename: &str) -> Result<(RawTable, SourceMetadata)>;
}

/// Delimited text (TSV, CSV, ...) with a header row.
#[derive(Debug, Clone)]
pub struct DelimitedLoader {
    delimiter: u8,
    quote: u8,
}

impl DelimitedLoader {
    /// Create a loader for the given separator.
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            quote: b'"',
        }
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8]) -> std::result::Result<RawTable, LoadCause> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .quote(self.quote)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if headers.is_empty() {
            return Err(LoadCause::Structure("No header row found".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(RawTable::new(headers, rows))
    }
}

impl Default for DelimitedLoader {
    fn default() -> Self {
        Self::new(b'\t')
    }
}

impl Loader for DelimitedLoader {
    fn load(&self, dir: &Path, filename: &str) -> Result<(RawTable, SourceMetadata)> {
        let path = dir.join(filename);
        let (contents, hash) = read_source(&path)?;
        let table = self
            .parse_bytes(&contents)
            .map_err(|e| LifeExpectancyError::load(&path, e))?;

        let metadata = SourceMetadata::new(
            path,
            hash,
            contents.len() as u64,
            delimiter_name(self.delimiter).to_string(),
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }
}

/// Structured records: a JSON array of objects, or one object per line.
#[derive(Debug, Clone, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Create a new JSON loader.
    pub fn new() -> Self {
        Self
    }

    fn parse_bytes(&self, bytes: &[u8]) -> std::result::Result<RawTable, LoadCause> {
        let is_array = bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| b == b'[');

        let records: Vec<IndexMap<String, Value>> = if is_array {
            serde_json::from_slice(bytes)?
        } else {
            serde_json::Deserializer::from_slice(bytes)
                .into_iter::<IndexMap<String, Value>>()
                .collect::<std::result::Result<_, _>>()?
        };

        let mut columns: IndexSet<String> = IndexSet::new();
        for record in &records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.insert(key.clone());
                }
            }
        }

        if columns.is_empty() {
            return Err(LoadCause::Structure("No columns found".to_string()));
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(RawTable::new(columns.into_iter().collect(), rows))
    }
}

impl Loader for JsonLoader {
    fn load(&self, dir: &Path, filename: &str) -> Result<(RawTable, SourceMetadata)> {
        let path = dir.join(filename);
        let (contents, hash) = read_source(&path)?;
        let table = self
            .parse_bytes(&contents)
            .map_err(|e| LifeExpectancyError::load(&path, e))?;

        let metadata = SourceMetadata::new(
            path,
            hash,
            contents.len() as u64,
            "json".to_string(),
            table.row_count(),
            table.column_count(),
        );
        Ok((table, metadata))
    }
}

/// Input format selecting a [`Loader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Delimited text with the given separator.
    Delimited(u8),
    /// JSON records.
    Json,
}

impl Format {
    /// Tab-separated values.
    pub const TSV: Format = Format::Delimited(b'\t');
    /// Comma-separated values.
    pub const CSV: Format = Format::Delimited(b',');

    /// Pick a format from the file extension; unknown extensions fall back to TSV.
    pub fn from_path(filename: &str) -> Format {
        let ext = Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        match ext.as_deref() {
            Some("csv") => Format::CSV,
            Some("json") | Some("jsonl") | Some("ndjson") => Format::Json,
            _ => Format::TSV,
        }
    }

    /// An explicit hint wins over the extension.
    pub fn from_hint_or_path(hint: Option<Format>, filename: &str) -> Format {
        hint.unwrap_or_else(|| Format::from_path(filename))
    }

    /// Build the loader for this format.
    pub fn loader(&self) -> Box<dyn Loader> {
        match self {
            Format::Delimited(delimiter) => Box::new(DelimitedLoader::new(*delimiter)),
            Format::Json => Box::new(JsonLoader::new()),
        }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::TSV
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(Format::TSV),
            "csv" => Ok(Format::CSV),
            "json" | "jsonl" => Ok(Format::Json),
            _ => Err(format!("Unknown format: {}. Use tsv, csv, or json.", s)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Delimited(delimiter) => f.write_str(delimiter_name(*delimiter)),
            Format::Json => f.write_str("json"),
        }
    }
}

/// Load `dir/filename` using the hinted format, or the one implied by the extension.
pub fn load(dir: &Path, filename: &str, hint: Option<Format>) -> Result<(RawTable, SourceMetadata)> {
    let format = Format::from_hint_or_path(hint, filename);
    debug!(%format, file = filename, "selected loader");
    format.loader().load(dir, filename)
}

/// Read the whole file and hash it.
fn read_source(path: &Path) -> Result<(Vec<u8>, String)> {
    let contents = fs::read(path).map_err(|e| LifeExpectancyError::load(path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let hash = format!("sha256:{:x}", hasher.finalize());

    Ok((contents, hash))
}

fn delimiter_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
