//! Property tests for series accumulation and merging.

use std::path::Path;

use chrono::NaiveDate;
use proptest::prelude::*;

use epi_ingest::{SeriesLayout, merge_series, read_wide_series_from_reader};
use epi_model::{FactKey, MetricSeries};

const COUNTRIES: [&str; 3] = ["France", "Peru", "Chad"];
const DATES: [&str; 3] = ["3/7/23", "3/8/23", "3/9/23"];

fn date(column: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 7 + column as u32).expect("valid date")
}

fn rows_strategy() -> impl Strategy<Value = Vec<(usize, Vec<i64>)>> {
    prop::collection::vec(
        (0..COUNTRIES.len(), prop::collection::vec(0i64..10_000, DATES.len())),
        0..12,
    )
}

fn render_csv(rows: &[(usize, Vec<i64>)]) -> String {
    let mut out = format!("Province/State,Country/Region,Lat,Long,{}\n", DATES.join(","));
    for (country, values) in rows {
        let cells: Vec<String> = values.iter().map(ToString::to_string).collect();
        out.push_str(&format!(",{},0,0,{}\n", COUNTRIES[*country], cells.join(",")));
    }
    out
}

fn series_strategy() -> impl Strategy<Value = MetricSeries> {
    prop::collection::vec((0..COUNTRIES.len(), 0..DATES.len(), 0i64..1_000), 0..10).prop_map(
        |entries| {
            entries
                .into_iter()
                .map(|(c, d, v)| (FactKey::new(COUNTRIES[c], date(d)), v))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn parsed_value_is_sum_of_matching_cells(rows in rows_strategy()) {
        let csv = render_csv(&rows);
        let (series, stats) = read_wide_series_from_reader(
            csv.as_bytes(),
            Path::new("generated.csv"),
            &SeriesLayout::default(),
        )
        .expect("generated csv parses");

        prop_assert_eq!(stats.rows, rows.len());
        prop_assert_eq!(stats.recovered_cells, 0);
        for (c, name) in COUNTRIES.iter().enumerate() {
            for column in 0..DATES.len() {
                let expected: i64 = rows
                    .iter()
                    .filter(|(country, _)| *country == c)
                    .map(|(_, values)| values[column])
                    .sum();
                let present = rows.iter().any(|(country, _)| *country == c);
                let key = FactKey::new(*name, date(column));
                if present {
                    prop_assert_eq!(series.get(&key), Some(expected));
                } else {
                    prop_assert!(!series.contains(&key));
                }
            }
        }
    }

    #[test]
    fn merged_rows_cover_union_with_zero_defaults(
        cases in series_strategy(),
        deaths in series_strategy(),
    ) {
        let rows = merge_series(&cases, &deaths);
        let union: std::collections::BTreeSet<&FactKey> =
            cases.keys().chain(deaths.keys()).collect();
        prop_assert_eq!(rows.len(), union.len());
        for row in &rows {
            let key = row.key();
            prop_assert!(cases.contains(&key) || deaths.contains(&key));
            prop_assert_eq!(row.cases_cumulative, cases.get_or_zero(&key));
            prop_assert_eq!(row.deaths_cumulative, deaths.get_or_zero(&key));
        }
    }
}
