use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::FactKey;

/// One merged observation: both cumulative metrics for a country on a day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactRow {
    pub country: String,
    pub date: NaiveDate,
    pub cases_cumulative: i64,
    pub deaths_cumulative: i64,
}

impl FactRow {
    pub fn new(key: FactKey, cases_cumulative: i64, deaths_cumulative: i64) -> Self {
        Self {
            country: key.country,
            date: key.date,
            cases_cumulative,
            deaths_cumulative,
        }
    }

    pub fn key(&self) -> FactKey {
        FactKey::new(self.country.clone(), self.date)
    }

    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Cases => self.cases_cumulative,
            Metric::Deaths => self.deaths_cumulative,
        }
    }
}

/// A country as known to the store. `name` is the identity, `id` a surrogate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
}

/// The two cumulative metrics carried by a fact row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cases,
    Deaths,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Cases => "cases",
            Metric::Deaths => "deaths",
        }
    }

    /// Column of `daily_stats` holding this metric.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Cases => "cases_cum",
            Metric::Deaths => "deaths_cum",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
