//! Error types for Caspr core.

use caspr_engine::engine::EngineError;
use thiserror::Error;

/// Errors that can occur while preparing cache sheets
#[derive(Error, Debug)]
pub enum CasprError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Refusing to read {path}: file too large ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("No cache file for {0}")]
    PageNotFound(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, CasprError>;
