//! Error types for the puzzle engine.

use thiserror::Error;

/// Errors raised by the engine.
///
/// Missing matches are never errors: they show up as empty sequences or as
/// letters left unresolved in a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("formula converter requires at least one variable address")]
    EmptyAddresses,

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Variable pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
