pub mod json_store;
pub mod legacy;
pub mod schema;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stats file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported export version: {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, StoreError>;
