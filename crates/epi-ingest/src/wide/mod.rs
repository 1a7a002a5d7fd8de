//! Wide time-series CSV reading.

mod cell;
mod header;
mod reader;

pub use cell::parse_count;
pub use header::parse_header_date;
pub use reader::{SeriesStats, WideSeries, read_wide_series, read_wide_series_from_reader};
