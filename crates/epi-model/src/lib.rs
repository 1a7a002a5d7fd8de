//! Value types shared by the ingestion pipeline and the store.
//!
//! - [`FactKey`]: the `(country, date)` identity of one observation
//! - [`MetricSeries`]: one metric's cumulative counts keyed by [`FactKey`]
//! - [`FactRow`]: the merged `(country, date, cases, deaths)` observation
//! - [`Country`]: a country name with its store-assigned identifier

#![deny(unsafe_code)]

mod fact;
mod key;
mod series;

pub use fact::{Country, FactRow, Metric};
pub use key::FactKey;
pub use series::MetricSeries;
