//! Batch input loading.
//!
//! A batch file is a newline-delimited list of domains. Blank lines and
//! lines starting with `#` are skipped.

use std::fs;
use std::path::Path;

use crate::error::BatchFileError;

/// Load domains from a batch file. An unreadable file is fatal to the run.
pub fn load_batch(path: impl AsRef<Path>) -> Result<Vec<String>, BatchFileError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| BatchFileError {
        path: path.display().to_string(),
        source,
    })?;

    Ok(contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(line.to_string())
        })
        .collect())
}
