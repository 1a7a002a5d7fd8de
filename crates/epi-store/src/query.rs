//! Read-side queries over the fact table.
//!
//! Every function here is a plain read; none of them opens a transaction or
//! mutates the store.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;

use epi_model::Metric;

use crate::error::{Result, StoreError};

/// Worldwide totals for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalTotals {
    pub date: NaiveDate,
    pub cases_cumulative: i64,
    pub deaths_cumulative: i64,
}

/// One day of a country's series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub cases_cumulative: i64,
    pub deaths_cumulative: i64,
}

/// A country's series over a date range, with its last point repeated as `latest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub series: Vec<SeriesPoint>,
    pub latest: Option<SeriesPoint>,
}

/// A country's values on a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryStats {
    pub country: String,
    pub cases: i64,
    pub deaths: i64,
}

impl CountryStats {
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Cases => self.cases,
            Metric::Deaths => self.deaths,
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            country: row.get(0)?,
            cases: row.get(1)?,
            deaths: row.get(2)?,
        })
    }
}

/// Parses a query date in strict `YYYY-MM-DD` form.
pub fn parse_query_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(idx, b)| match idx {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(StoreError::InvalidArgument {
            message: format!("date must be YYYY-MM-DD, got '{raw}'"),
        });
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| StoreError::InvalidArgument {
        message: format!("'{raw}' is not a calendar date"),
    })
}

/// Most recent date present in the fact table, if any.
pub fn latest_date(conn: &Connection) -> Result<Option<NaiveDate>> {
    let date = conn.query_row("SELECT max(date) FROM daily_stats", [], |row| row.get(0))?;
    Ok(date)
}

fn require_latest(conn: &Connection) -> Result<NaiveDate> {
    latest_date(conn)?.ok_or_else(|| StoreError::NotFound {
        what: "stored data".to_string(),
    })
}

/// Sums both metrics over every country for `date`, or the latest date when `None`.
pub fn global_totals(conn: &Connection, date: Option<NaiveDate>) -> Result<GlobalTotals> {
    let date = match date {
        Some(date) => date,
        None => require_latest(conn)?,
    };
    conn.query_row(
        "SELECT ds.date, SUM(ds.cases_cum), SUM(ds.deaths_cum)
         FROM daily_stats ds
         WHERE ds.date = ?1
         GROUP BY ds.date",
        params![date],
        |row| {
            Ok(GlobalTotals {
                date: row.get(0)?,
                cases_cumulative: row.get(1)?,
                deaths_cumulative: row.get(2)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| StoreError::NotFound {
        what: format!("data for {date}"),
    })
}

/// A country's series between `start` and `end`, both inclusive.
///
/// An open bound extends to the country's first or last stored date.
pub fn country_series(
    conn: &Connection,
    country: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<CountrySeries> {
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(StoreError::InvalidArgument {
            message: format!("start {start} is after end {end}"),
        });
    }
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM country WHERE name = ?1)",
        params![country],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(StoreError::NotFound {
            what: format!("country '{country}'"),
        });
    }

    let mut stmt = conn.prepare(
        "SELECT ds.date, ds.cases_cum, ds.deaths_cum
         FROM daily_stats ds JOIN country c ON c.id = ds.country_id
         WHERE c.name = ?1
           AND (?2 IS NULL OR ds.date >= ?2)
           AND (?3 IS NULL OR ds.date <= ?3)
         ORDER BY ds.date",
    )?;
    let series = stmt
        .query_map(params![country, start, end], |row| {
            Ok(SeriesPoint {
                date: row.get(0)?,
                cases_cumulative: row.get(1)?,
                deaths_cumulative: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let latest = series.last().cloned();
    Ok(CountrySeries {
        country: country.to_string(),
        series,
        latest,
    })
}

/// Every known country name, sorted.
pub fn countries(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM country ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Each country's values on the latest stored date, highest case count first.
///
/// Ties are broken by name. Empty when the store holds no facts.
pub fn latest_by_country(conn: &Connection) -> Result<Vec<CountryStats>> {
    let Some(date) = latest_date(conn)? else {
        return Ok(Vec::new());
    };
    let mut stmt = conn.prepare(
        "SELECT c.name, ds.cases_cum, ds.deaths_cum
         FROM daily_stats ds JOIN country c ON c.id = ds.country_id
         WHERE ds.date = ?1
         ORDER BY ds.cases_cum DESC, c.name",
    )?;
    let stats = stmt
        .query_map(params![date], CountryStats::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(stats)
}

/// The `limit` countries with the highest `metric` on the latest stored date.
///
/// Ties are broken by name.
pub fn top_countries(conn: &Connection, metric: Metric, limit: usize) -> Result<Vec<CountryStats>> {
    let Some(date) = latest_date(conn)? else {
        return Ok(Vec::new());
    };
    let limit = i64::try_from(limit).map_err(|_| StoreError::InvalidArgument {
        message: format!("limit {limit} is too large"),
    })?;
    let sql = format!(
        "SELECT c.name, ds.cases_cum, ds.deaths_cum
         FROM daily_stats ds JOIN country c ON c.id = ds.country_id
         WHERE ds.date = ?1
         ORDER BY ds.{column} DESC, c.name
         LIMIT ?2",
        column = metric.column()
    );
    let mut stmt = conn.prepare(&sql)?;
    let stats = stmt
        .query_map(params![date, limit], CountryStats::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(stats)
}
