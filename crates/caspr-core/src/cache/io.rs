use super::Cache;
use crate::error::{CasprError, Result};
use std::path::Path;

const MAX_CACHE_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Read a cache file, refusing oversized input.
pub fn read_page(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CACHE_FILE_BYTES {
        return Err(CasprError::FileTooLarge {
            path: path.display().to_string(),
            size: meta.len(),
            max: MAX_CACHE_FILE_BYTES,
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

impl Cache {
    /// Decode a cache from TOML text.
    pub fn from_toml(content: &str) -> Result<Cache> {
        toml::from_str(content).map_err(|err| CasprError::Parse {
            line: err
                .span()
                .map(|span| line_of(content, span.start))
                .unwrap_or(0),
            message: err.message().to_string(),
        })
    }
}

/// 1-based line number of a byte offset.
fn line_of(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
