//! JSON export of the raw rows.

use crate::error::Result;
use caspr_engine::engine::Row;

/// Pretty-printed array of `{ "row", "column", "cells" }` objects.
pub fn write_json_content(rows: &[Row]) -> Result<String> {
    let mut content = serde_json::to_string_pretty(rows)?;
    content.push('\n');
    Ok(content)
}
