//! Error types for clump operations

use thiserror::Error;

use crate::clump::ClumpId;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid brush: {0}")]
    InvalidBrush(String),

    #[error("Unknown clump: {0:?}")]
    UnknownClump(ClumpId),
}
