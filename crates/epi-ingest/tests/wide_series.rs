//! File-level tests for wide time-series parsing.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use epi_ingest::{IngestError, SeriesLayout, merge_series, read_wide_series};
use epi_model::FactKey;

const HEADER: &str = "Province/State,Country/Region,Lat,Long,3/8/23,3/9/23";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, day).expect("valid date")
}

#[test]
fn france_example_sums_cases_and_keeps_deaths() {
    let dir = TempDir::new().unwrap();
    let cases = write(
        &dir,
        "confirmed.csv",
        &format!("{HEADER}\nMartinique,France,14.6,-61.0,9,10\n,France,46.2,2.2,4,5\n"),
    );
    let deaths = write(&dir, "deaths.csv", &format!("{HEADER}\n,France,46.2,2.2,1,2\n"));

    let layout = SeriesLayout::default();
    let cases = read_wide_series(&cases, &layout).expect("parse cases");
    let deaths = read_wide_series(&deaths, &layout).expect("parse deaths");
    let rows = merge_series(&cases.series, &deaths.series);

    let row = rows
        .iter()
        .find(|r| r.key() == FactKey::new("France", march(9)))
        .expect("france row");
    assert_eq!(row.cases_cumulative, 15);
    assert_eq!(row.deaths_cumulative, 2);
    assert_eq!(rows.len(), 2);
}

#[test]
fn deaths_only_country_has_zero_cases() {
    let dir = TempDir::new().unwrap();
    let cases = write(&dir, "confirmed.csv", &format!("{HEADER}\n,Peru,0,0,3,4\n"));
    let deaths = write(&dir, "deaths.csv", &format!("{HEADER}\n,Chad,0,0,0,6\n"));

    let layout = SeriesLayout::default();
    let cases = read_wide_series(&cases, &layout).unwrap();
    let deaths = read_wide_series(&deaths, &layout).unwrap();
    let rows = merge_series(&cases.series, &deaths.series);

    let chad = rows
        .iter()
        .find(|r| r.country == "Chad" && r.date == march(9))
        .expect("chad row");
    assert_eq!(chad.cases_cumulative, 0);
    assert_eq!(chad.deaths_cumulative, 6);
}

#[test]
fn digest_tracks_file_bytes() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.csv", &format!("{HEADER}\n,Peru,0,0,3,4\n"));
    let b = write(&dir, "b.csv", &format!("{HEADER}\n,Peru,0,0,3,4\n"));
    let c = write(&dir, "c.csv", &format!("{HEADER}\n,Peru,0,0,3,5\n"));

    let layout = SeriesLayout::default();
    let a = read_wide_series(&a, &layout).unwrap();
    let b = read_wide_series(&b, &layout).unwrap();
    let c = read_wide_series(&c, &layout).unwrap();

    assert_eq!(a.digest, b.digest);
    assert_ne!(a.digest, c.digest);
    assert_eq!(a.digest.len(), 64);
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = TempDir::new().unwrap();
    let err = read_wide_series(&dir.path().join("absent.csv"), &SeriesLayout::default())
        .expect_err("missing file");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn custom_layout_reads_other_columns() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "narrow.csv", "Country,3/9/23\nChad,8\nChad,1\n");
    let parsed = read_wide_series(&path, &SeriesLayout::new(0, 1)).unwrap();
    assert_eq!(parsed.series.get(&FactKey::new("Chad", march(9))), Some(9));
    assert_eq!(parsed.stats.rows, 2);
}

#[test]
fn utf8_bom_does_not_break_the_header() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bom.csv", "\u{feff}Country,3/9/23\nChad,8\n");
    let parsed = read_wide_series(&path, &SeriesLayout::new(0, 1)).unwrap();
    assert_eq!(parsed.series.get(&FactKey::new("Chad", march(9))), Some(8));
}
