//! Ingestion of wide epidemiological time series.
//!
//! Source files carry one row per geographic unit and one column per
//! reporting day. This crate turns such a file into a [`MetricSeries`]
//! (summing rows that share a country) and merges the case and death
//! series into [`FactRow`]s ready for the store.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use epi_ingest::{SeriesLayout, merge_series, read_wide_series};
//!
//! let layout = SeriesLayout::default();
//! let cases = read_wide_series(Path::new("confirmed.csv"), &layout)?;
//! let deaths = read_wide_series(Path::new("deaths.csv"), &layout)?;
//! let rows = merge_series(&cases.series, &deaths.series);
//! ```
//!
//! [`MetricSeries`]: epi_model::MetricSeries
//! [`FactRow`]: epi_model::FactRow

mod error;
mod layout;
mod merge;
mod wide;

// === Error Types ===
pub use error::{IngestError, Result};

// === Wide Series Parsing ===
pub use wide::{
    SeriesStats, WideSeries, parse_count, parse_header_date, read_wide_series,
    read_wide_series_from_reader,
};
pub use layout::SeriesLayout;

// === Merging ===
pub use merge::merge_series;
