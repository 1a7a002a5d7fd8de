//! Transactional write of one ingestion run.

use std::collections::{BTreeSet, HashMap};

use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use serde::Serialize;
use tracing::{debug, info, info_span};

use epi_model::{Country, FactRow};

use crate::error::{Result, StoreError};

/// Rows between two progress events while upserting.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

const INSERT_COUNTRY: &str =
    "INSERT INTO country(name) VALUES (?1) ON CONFLICT(name) DO NOTHING RETURNING id";
const SELECT_COUNTRY: &str = "SELECT id FROM country WHERE name = ?1";
const UPSERT_DAILY: &str = "
INSERT INTO daily_stats(country_id, date, cases_cum, deaths_cum)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(country_id, date) DO UPDATE
  SET cases_cum = excluded.cases_cum,
      deaths_cum = excluded.deaths_cum";

/// Tuning for [`commit_facts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOptions {
    pub batch_size: usize,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// What a committed run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    /// Distinct countries referenced by the run.
    pub countries: usize,
    /// Countries that did not exist before the run.
    pub countries_created: usize,
    /// Fact rows inserted or overwritten.
    pub rows_written: usize,
}

/// Returns the country row for `name`, inserting it first if absent.
///
/// The boolean is `true` when this call created the row. A concurrent insert
/// of the same name resolves to the row that won.
pub fn get_or_create_country(conn: &Connection, name: &str) -> Result<(Country, bool)> {
    let resolution_error = |source| StoreError::CountryResolution {
        name: name.to_string(),
        source,
    };
    let inserted: Option<i64> = conn
        .prepare_cached(INSERT_COUNTRY)
        .and_then(|mut stmt| stmt.query_row(params![name], |row| row.get(0)).optional())
        .map_err(resolution_error)?;
    let (id, created) = match inserted {
        Some(id) => (id, true),
        None => {
            let id = conn
                .prepare_cached(SELECT_COUNTRY)
                .and_then(|mut stmt| stmt.query_row(params![name], |row| row.get(0)))
                .map_err(resolution_error)?;
            (id, false)
        }
    };
    Ok((
        Country {
            id,
            name: name.to_string(),
        },
        created,
    ))
}

/// Writes every fact row in a single transaction.
///
/// Countries are resolved first, then rows are upserted in (country, date)
/// order; an existing `(country_id, date)` pair has its cumulative values
/// replaced. The transaction commits only after the last row is written. On
/// any error it is dropped, which rolls back everything this call did.
pub fn commit_facts(
    conn: &mut Connection,
    rows: &[FactRow],
    options: &CommitOptions,
) -> Result<CommitSummary> {
    let span = info_span!("commit", rows = rows.len());
    let _guard = span.enter();

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|source| StoreError::Transaction {
            stage: "begin",
            source,
        })?;

    let names: BTreeSet<&str> = rows.iter().map(|row| row.country.as_str()).collect();
    let mut ids: HashMap<&str, i64> = HashMap::with_capacity(names.len());
    let mut countries_created = 0usize;
    for &name in &names {
        let (country, created) = get_or_create_country(&tx, name)?;
        if created {
            countries_created += 1;
        }
        ids.insert(name, country.id);
    }
    debug!(
        countries = names.len(),
        created = countries_created,
        "countries resolved"
    );

    let mut ordered: Vec<&FactRow> = rows.iter().collect();
    ordered.sort_unstable();

    let batch_size = options.batch_size.max(1);
    let mut rows_written = 0usize;
    {
        let mut upsert = tx
            .prepare_cached(UPSERT_DAILY)
            .map_err(|source| StoreError::Transaction {
                stage: "prepare",
                source,
            })?;
        for row in ordered {
            let Some(&country_id) = ids.get(row.country.as_str()) else {
                return Err(StoreError::UnresolvedCountry {
                    name: row.country.clone(),
                });
            };
            upsert
                .execute(params![
                    country_id,
                    row.date,
                    row.cases_cumulative,
                    row.deaths_cumulative
                ])
                .map_err(|source| StoreError::Upsert {
                    country: row.country.clone(),
                    date: row.date,
                    source,
                })?;
            rows_written += 1;
            if rows_written % batch_size == 0 {
                debug!(written = rows_written, total = rows.len(), "upsert progress");
            }
        }
    }

    tx.commit().map_err(|source| StoreError::Transaction {
        stage: "commit",
        source,
    })?;

    let summary = CommitSummary {
        countries: names.len(),
        countries_created,
        rows_written,
    };
    info!(
        countries = summary.countries,
        countries_created = summary.countries_created,
        rows = summary.rows_written,
        "run committed"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ensure_schema;
    use chrono::NaiveDate;
    use epi_model::FactKey;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn row(country: &str, day: u32, cases: i64, deaths: i64) -> FactRow {
        FactRow::new(
            FactKey::new(country, NaiveDate::from_ymd_opt(2023, 3, day).unwrap()),
            cases,
            deaths,
        )
    }

    #[test]
    fn get_or_create_reuses_existing_id() {
        let conn = store();
        let (first, created) = get_or_create_country(&conn, "Chad").unwrap();
        assert!(created);
        let (second, created) = get_or_create_country(&conn, "Chad").unwrap();
        assert!(!created);
        assert_eq!(first, second);
        let (other, _) = get_or_create_country(&conn, "Peru").unwrap();
        assert_ne!(other.id, first.id);
    }

    #[test]
    fn commit_counts_created_countries_once() {
        let mut conn = store();
        let rows = vec![row("Chad", 1, 1, 0), row("Chad", 2, 2, 0), row("Peru", 1, 5, 1)];
        let summary = commit_facts(&mut conn, &rows, &CommitOptions::default()).unwrap();
        assert_eq!(
            summary,
            CommitSummary {
                countries: 2,
                countries_created: 2,
                rows_written: 3,
            }
        );

        let again = commit_facts(&mut conn, &rows, &CommitOptions { batch_size: 1 }).unwrap();
        assert_eq!(again.countries_created, 0);
        assert_eq!(again.rows_written, 3);
    }

    #[test]
    fn empty_run_commits_nothing() {
        let mut conn = store();
        let summary = commit_facts(&mut conn, &[], &CommitOptions::default()).unwrap();
        assert_eq!(summary, CommitSummary::default());
    }
}
