use anyhow::{Context, Result};
use serde::Serialize;
use tracing::error;

use epi_cli::cli::{IngestArgs, QueryArgs, QueryCommand};
use epi_cli::config::{ConfigError, IngestConfig, store_config};
use epi_cli::pipeline::{PipelineError, run_ingest};
use epi_model::Metric;
use epi_store::query::{
    countries, country_series, global_totals, latest_by_country, latest_date, parse_query_date,
    top_countries,
};

use crate::summary::{
    print_countries, print_country_series, print_country_stats, print_global,
    print_ingest_summary, print_latest,
};

/// Validates arguments, runs the pipeline and reports. Returns the exit code.
pub fn run_ingest_command(args: &IngestArgs) -> i32 {
    let result = IngestConfig::from_args(args)
        .map_err(PipelineError::from)
        .and_then(|config| run_ingest(&config));
    match result {
        Ok(report) => {
            if args.json {
                if let Err(error) = print_json(&report) {
                    eprintln!("error: {error:#}");
                    return 1;
                }
            } else {
                print_ingest_summary(&report);
            }
            0
        }
        Err(error) => {
            error!(%error, "ingestion failed");
            eprintln!("error: {error}");
            error.exit_code()
        }
    }
}

/// Runs one read query. Returns the exit code.
pub fn run_query_command(args: &QueryArgs) -> i32 {
    match run_query(args) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            if error.downcast_ref::<ConfigError>().is_some() {
                2
            } else {
                1
            }
        }
    }
}

fn run_query(args: &QueryArgs) -> Result<()> {
    let store = store_config(&args.store)?;
    let conn = store.open().context("open store")?;
    let json = args.json;
    match &args.query {
        QueryCommand::Latest => {
            let date = latest_date(&conn).context("latest date")?;
            if json {
                print_json(&serde_json::json!({ "latest_date": date }))?;
            } else {
                print_latest(date);
            }
        }
        QueryCommand::Global { date } => {
            let date = date.as_deref().map(parse_query_date).transpose()?;
            let totals = global_totals(&conn, date).context("global totals")?;
            if json {
                print_json(&totals)?;
            } else {
                print_global(&totals);
            }
        }
        QueryCommand::Country { name, start, end } => {
            let start = start.as_deref().map(parse_query_date).transpose()?;
            let end = end.as_deref().map(parse_query_date).transpose()?;
            let series = country_series(&conn, name, start, end)
                .with_context(|| format!("series for {name}"))?;
            if json {
                print_json(&series)?;
            } else {
                print_country_series(&series);
            }
        }
        QueryCommand::Countries => {
            let names = countries(&conn).context("list countries")?;
            if json {
                print_json(&names)?;
            } else {
                print_countries(&names);
            }
        }
        QueryCommand::LatestAll => {
            let stats = latest_by_country(&conn).context("latest values")?;
            if json {
                print_json(&stats)?;
            } else {
                print_country_stats("Latest values", &stats);
            }
        }
        QueryCommand::Top { metric, limit } => {
            let metric: Metric = (*metric).into();
            let stats = top_countries(&conn, metric, *limit).context("top countries")?;
            if json {
                print_json(&stats)?;
            } else {
                print_country_stats(&format!("Top {limit} by {metric}"), &stats);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{rendered}");
    Ok(())
}
