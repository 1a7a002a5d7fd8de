//! Persistence for the country/day fact table.
//!
//! The store holds two tables:
//!
//! ```text
//! country(id, name UNIQUE)
//! daily_stats(country_id REFERENCES country, date, cases_cum, deaths_cum,
//!             UNIQUE(country_id, date))
//! ```
//!
//! [`commit_facts`] writes a full run in one transaction: country names are
//! resolved with get-or-create, then every fact row is upserted. Any failure
//! rolls the whole run back. The [`query`] module holds the read side.

#![deny(unsafe_code)]

mod commit;
mod config;
mod error;
pub mod query;
mod schema;

pub use commit::{
    CommitOptions, CommitSummary, DEFAULT_BATCH_SIZE, commit_facts, get_or_create_country,
};
pub use config::{Credential, DEFAULT_BUSY_TIMEOUT, StoreConfig, StoreTarget};
pub use error::{Result, StoreError};
pub use schema::ensure_schema;

pub use rusqlite::Connection;
