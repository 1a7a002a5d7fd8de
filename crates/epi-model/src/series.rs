use std::collections::HashMap;
use std::collections::hash_map::Iter;

use chrono::NaiveDate;

use crate::FactKey;

/// Cumulative counts of one metric, keyed by `(country, date)`.
///
/// Values only ever grow by [`MetricSeries::add`]: each key holds the sum of
/// every contribution recorded for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricSeries {
    values: HashMap<FactKey, i64>,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the running total for `key`, inserting it if absent.
    pub fn add(&mut self, key: FactKey, value: i64) {
        let slot = self.values.entry(key).or_insert(0);
        *slot = slot.saturating_add(value);
    }

    /// Convenience for [`MetricSeries::add`] without building the key first.
    pub fn add_for(&mut self, country: &str, date: NaiveDate, value: i64) {
        self.add(FactKey::new(country, date), value);
    }

    pub fn get(&self, key: &FactKey) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Value for `key`, or zero when the key was never recorded.
    pub fn get_or_zero(&self, key: &FactKey) -> i64 {
        self.get(key).unwrap_or(0)
    }

    pub fn contains(&self, key: &FactKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FactKey> {
        self.values.keys()
    }

    pub fn iter(&self) -> Iter<'_, FactKey, i64> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a MetricSeries {
    type Item = (&'a FactKey, &'a i64);
    type IntoIter = Iter<'a, FactKey, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<(FactKey, i64)> for MetricSeries {
    fn from_iter<T: IntoIterator<Item = (FactKey, i64)>>(iter: T) -> Self {
        let mut series = Self::new();
        for (key, value) in iter {
            series.add(key, value);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
    }

    #[test]
    fn add_sums_repeated_keys() {
        let mut series = MetricSeries::new();
        series.add_for("France", day(9), 10);
        series.add_for("France", day(9), 5);
        series.add_for("France", day(10), 1);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(&FactKey::new("France", day(9))), Some(15));
        assert_eq!(series.get(&FactKey::new("France", day(10))), Some(1));
    }

    #[test]
    fn missing_key_reads_as_zero() {
        let series = MetricSeries::new();
        let key = FactKey::new("Peru", day(1));
        assert_eq!(series.get(&key), None);
        assert_eq!(series.get_or_zero(&key), 0);
    }

    #[test]
    fn labels_are_not_normalized() {
        let series: MetricSeries = [
            (FactKey::new("Korea, South", day(1)), 3),
            (FactKey::new("Korea, South.", day(1)), 4),
        ]
        .into_iter()
        .collect();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn add_saturates_instead_of_overflowing() {
        let mut series = MetricSeries::new();
        series.add_for("X", day(1), i64::MAX);
        series.add_for("X", day(1), 1);
        assert_eq!(series.get(&FactKey::new("X", day(1))), Some(i64::MAX));
    }
}
