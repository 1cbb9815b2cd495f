//! CSV writer for tidy tables.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::error::{LifeExpectancyError, Result};
use crate::region::Region;
use crate::schema::{OUTPUT_COLUMNS, TidyTable};

/// File name used when no region filter was applied.
pub const DEFAULT_OUTPUT_FILE: &str = "eu_life_expectancy_expected.csv";

/// Suffix appended to the lowercased region code.
pub const REGION_OUTPUT_SUFFIX: &str = "_life_expectancy.csv";

/// Details of a completed write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenFile {
    /// Final location of the file.
    pub path: PathBuf,
    /// SHA-256 hash of the bytes written.
    pub hash: String,
    /// Number of bytes written.
    pub size_bytes: u64,
}

/// Output file name for an optional region filter.
pub fn output_filename(region: Option<Region>) -> String {
    match region {
        Some(region) => format!("{}{}", region.file_stem(), REGION_OUTPUT_SUFFIX),
        None => DEFAULT_OUTPUT_FILE.to_string(),
    }
}

/// Serialize the table as comma-separated text with a header row and no index.
pub fn to_csv_bytes(table: &TidyTable) -> csv::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buffer);

        // Written explicitly so an empty table still gets its header.
        writer.write_record(OUTPUT_COLUMNS)?;
        for record in table {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }

    Ok(buffer)
}

/// Temporary file in `dir` created with the same default mode as `fs::write`
/// (0666 before the umask), so the renamed output is not owner-only.
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Write `table` into `dir`, naming the file after the region filter.
///
/// The file is staged next to its destination and renamed into place, so a
/// failed write leaves no partial output behind.
pub fn write(dir: &Path, table: &TidyTable, region: Option<Region>) -> Result<WrittenFile> {
    let path = dir.join(output_filename(region));
    let write_error = |source: io::Error| LifeExpectancyError::Write {
        path: path.clone(),
        source,
    };

    let bytes = to_csv_bytes(table).map_err(|e| write_error(e.into()))?;

    let mut staged = staging_file(dir).map_err(write_error)?;
    staged.write_all(&bytes).map_err(write_error)?;
    staged.flush().map_err(write_error)?;
    staged.persist(&path).map_err(|e| write_error(e.error))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let hash = format!("sha256:{:x}", hasher.finalize());

    info!(path = %path.display(), rows = table.len(), "wrote tidy table");

    Ok(WrittenFile {
        path,
        hash,
        size_bytes: bytes.len() as u64,
    })
}
