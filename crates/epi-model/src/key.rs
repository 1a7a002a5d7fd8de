use std::fmt;

use chrono::NaiveDate;

/// Identity of a single observation: an exact country label and a calendar day.
///
/// Labels are compared byte for byte. Two spellings of the same country are
/// two different keys.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FactKey {
    pub country: String,
    pub date: NaiveDate,
}

impl FactKey {
    pub fn new(country: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            country: country.into(),
            date,
        }
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.country, self.date)
    }
}
