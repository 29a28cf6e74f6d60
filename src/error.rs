//! Error type for store construction.
//!
//! Only opening the database and bringing the schema up to date can
//! fail loudly; every other store operation logs and returns a failure
//! indicator instead of propagating (see the `store` module docs).

use thiserror::Error;

/// Fatal store-open / schema errors, surfaced from initialization only.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(#[source] rusqlite::Error),

    #[error("failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("schema migration failed: {0}")]
    Migration(#[source] rusqlite::Error),
}

/// Result type alias for store initialization.
pub type Result<T> = std::result::Result<T, StoreError>;
