use rusqlite::Connection;

use crate::error::{Result, StoreError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS country (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT    NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS daily_stats (
    country_id INTEGER NOT NULL REFERENCES country(id),
    date       TEXT    NOT NULL,
    cases_cum  INTEGER NOT NULL DEFAULT 0,
    deaths_cum INTEGER NOT NULL DEFAULT 0,
    UNIQUE (country_id, date)
);

CREATE INDEX IF NOT EXISTS daily_stats_date ON daily_stats(date);
";

/// Creates the `country` and `daily_stats` tables when they are missing.
///
/// Existing tables are left untouched.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .map_err(|source| StoreError::Schema { source })
}
