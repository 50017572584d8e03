//! Sheet output formats: .grd, .csv and .json

pub mod csv;
pub mod grd;
pub mod json;

use crate::error::{CasprError, Result};
use crate::sheet::Sheet;
use caspr_engine::engine::Row;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Output format of a prepared sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Grd,
    Csv,
    Json,
}

impl Format {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Grd => "grd",
            Format::Csv => "csv",
            Format::Json => "json",
        }
    }

    /// Render rows of one location in this format.
    pub fn render(self, rows: &[Row]) -> Result<String> {
        match self {
            Format::Grd => Ok(grd::write_grd_content(&Sheet::from_rows(rows.iter().cloned()))),
            Format::Csv => Ok(csv::write_csv_content(&Sheet::from_rows(rows.iter().cloned()))),
            Format::Json => json::write_json_content(rows),
        }
    }
}

impl FromStr for Format {
    type Err = CasprError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grd" => Ok(Format::Grd),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(CasprError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
