use std::collections::BTreeSet;

use epi_model::{FactKey, FactRow, MetricSeries};

/// Joins the case and death series over the union of their keys.
///
/// A key missing from one series contributes zero for that metric. Rows come
/// out ordered by country, then date.
pub fn merge_series(cases: &MetricSeries, deaths: &MetricSeries) -> Vec<FactRow> {
    let keys: BTreeSet<&FactKey> = cases.keys().chain(deaths.keys()).collect();
    keys.into_iter()
        .map(|key| FactRow::new(key.clone(), cases.get_or_zero(key), deaths.get_or_zero(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 3, d).unwrap()
    }

    fn render(rows: &[FactRow]) -> String {
        rows.iter()
            .map(|r| {
                format!(
                    "{} {} cases={} deaths={}",
                    r.country, r.date, r.cases_cumulative, r.deaths_cumulative
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn union_with_zero_defaults() {
        let mut cases = MetricSeries::new();
        cases.add_for("France", day(9), 10);
        cases.add_for("France", day(9), 5);
        cases.add_for("Peru", day(9), 4);
        let mut deaths = MetricSeries::new();
        deaths.add_for("France", day(9), 2);
        deaths.add_for("Chad", day(9), 1);

        let rows = merge_series(&cases, &deaths);
        insta::assert_snapshot!(render(&rows), @r"
        Chad 2023-03-09 cases=0 deaths=1
        France 2023-03-09 cases=15 deaths=2
        Peru 2023-03-09 cases=4 deaths=0
        ");
    }

    #[test]
    fn empty_inputs_merge_to_nothing() {
        assert!(merge_series(&MetricSeries::new(), &MetricSeries::new()).is_empty());
    }

    #[test]
    fn mismatched_labels_stay_separate() {
        let mut cases = MetricSeries::new();
        cases.add_for("Korea, South", day(1), 7);
        let mut deaths = MetricSeries::new();
        deaths.add_for("South Korea", day(1), 1);

        let rows = merge_series(&cases, &deaths);
        assert_eq!(rows.len(), 2);
        assert!(
            rows.iter()
                .any(|r| r.country == "Korea, South" && r.deaths_cumulative == 0)
        );
        assert!(
            rows.iter()
                .any(|r| r.country == "South Korea" && r.cases_cumulative == 0)
        );
    }
}
