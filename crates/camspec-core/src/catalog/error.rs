//! Catalog error types

use thiserror::Error;

/// Errors raised while querying or decoding a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Catalog rejected query: {0}")]
    Rejected(String),

    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
