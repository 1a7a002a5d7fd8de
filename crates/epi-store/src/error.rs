//! Store error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the store, on both the write and the read side.
#[derive(Debug, Error)]
pub enum StoreError {
    // === Connection ===
    /// The store could not be opened or configured.
    #[error("failed to open store {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Creating the tables failed.
    #[error("failed to prepare store schema: {source}")]
    Schema {
        #[source]
        source: rusqlite::Error,
    },

    // === Write Side ===
    /// Beginning or committing the run transaction failed.
    #[error("failed to {stage} transaction: {source}")]
    Transaction {
        stage: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Get-or-create of a country row failed.
    #[error("failed to resolve country '{name}': {source}")]
    CountryResolution {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A fact row referenced a country that was never resolved.
    #[error("no identifier resolved for country '{name}'")]
    UnresolvedCountry { name: String },

    /// Writing one fact row failed.
    #[error("failed to upsert {country} on {date}: {source}")]
    Upsert {
        country: String,
        date: NaiveDate,
        #[source]
        source: rusqlite::Error,
    },

    // === Read Side ===
    /// The requested entity does not exist.
    #[error("{what} not found")]
    NotFound { what: String },

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A read query failed.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
