//! Wide-format reader: header of dates, one row per geographic unit.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use epi_model::MetricSeries;

use crate::error::{IngestError, Result};
use crate::layout::SeriesLayout;

use super::cell::parse_count;
use super::header::parse_header_date;

/// Counters collected while reading one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesStats {
    /// Data rows read (header excluded).
    pub rows: usize,
    /// Date columns in the header.
    pub date_columns: usize,
    /// Data cells visited.
    pub cells: usize,
    /// Blank or non-integer cells that were read as zero.
    pub recovered_cells: usize,
}

/// A parsed file: the summed series plus what was seen on the way.
#[derive(Debug, Clone)]
pub struct WideSeries {
    pub series: MetricSeries,
    pub stats: SeriesStats,
    /// Lowercase hex SHA-256 of the raw file bytes.
    pub digest: String,
}

/// Reads a wide time-series file from disk.
///
/// The file is hashed and parsed from the same buffer, so the digest always
/// describes exactly the bytes that produced the series.
pub fn read_wide_series(path: &Path, layout: &SeriesLayout) -> Result<WideSeries> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let digest = hex::encode(Sha256::digest(&bytes));
    let (series, stats) = read_wide_series_from_reader(bytes.as_slice(), path, layout)?;
    debug!(
        path = %path.display(),
        rows = stats.rows,
        keys = series.len(),
        digest = %digest,
        "parsed time series"
    );
    Ok(WideSeries {
        series,
        stats,
        digest,
    })
}

/// Parses wide time-series CSV from any reader.
///
/// `source` only labels errors and log events.
pub fn read_wide_series_from_reader<R: Read>(
    reader: R,
    source: &Path,
    layout: &SeriesLayout,
) -> Result<(MetricSeries, SeriesStats)> {
    if !layout.is_valid() {
        return Err(IngestError::InvalidLayout {
            label_column: layout.label_column,
            first_date_column: layout.first_date_column,
        });
    }
    let csv_error = |source_err: csv::Error| IngestError::Csv {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyFile {
            path: source.to_path_buf(),
        });
    }
    if headers.len() <= layout.label_column {
        return Err(IngestError::MissingColumn {
            path: source.to_path_buf(),
            column: layout.label_column,
            found: headers.len(),
        });
    }

    let dates = date_columns(&headers, source, layout)?;
    if dates.is_empty() {
        warn!(path = %source.display(), "time series has no date columns");
    }

    let mut series = MetricSeries::new();
    let mut stats = SeriesStats {
        date_columns: dates.len(),
        ..SeriesStats::default()
    };
    let expected = headers.len();
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        stats.rows += 1;
        if record.len() < expected {
            return Err(IngestError::ShortRow {
                path: source.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                found: record.len(),
                expected,
            });
        }
        let label =
            String::from_utf8_lossy(record.get(layout.label_column).unwrap_or_default());
        let country = label.trim();
        for &(column, date) in &dates {
            let cell = record.get(column).unwrap_or_default();
            stats.cells += 1;
            let value = std::str::from_utf8(cell)
                .ok()
                .and_then(parse_count)
                .unwrap_or_else(|| {
                    stats.recovered_cells += 1;
                    0
                });
            series.add_for(country, date, value);
        }
    }

    if stats.recovered_cells > 0 {
        debug!(
            path = %source.display(),
            recovered = stats.recovered_cells,
            "blank or non-numeric cells read as zero"
        );
    }
    Ok((series, stats))
}

/// Resolves every header cell from the first date column onward.
fn date_columns(
    headers: &csv::StringRecord,
    source: &Path,
    layout: &SeriesLayout,
) -> Result<Vec<(usize, NaiveDate)>> {
    headers
        .iter()
        .enumerate()
        .skip(layout.first_date_column)
        .map(|(column, value)| {
            parse_header_date(value)
                .map(|date| (column, date))
                .ok_or_else(|| IngestError::InvalidHeaderDate {
                    path: source.to_path_buf(),
                    column,
                    value: value.to_string(),
                })
        })
        .collect()
}
