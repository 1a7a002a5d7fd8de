//! The ingestion driver: parse both files, merge, commit.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span};

use epi_ingest::{IngestError, SeriesLayout, WideSeries, merge_series, read_wide_series};
use epi_model::Metric;
use epi_store::{CommitSummary, StoreError, commit_facts};

use crate::config::{ConfigError, IngestConfig};

/// Why a run failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invocation parameters were missing or unusable; nothing was read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file was unreadable or structurally malformed; nothing was written.
    #[error("failed to parse {metric} file: {source}")]
    Parse {
        metric: Metric,
        #[source]
        source: IngestError,
    },

    /// The store rejected the run; the transaction was rolled back.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl PipelineError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Parse { .. } | Self::Persistence(_) => 1,
        }
    }
}

/// What was read from one input file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub metric: Metric,
    pub path: PathBuf,
    pub sha256: String,
    pub rows: usize,
    pub date_columns: usize,
    pub keys: usize,
    pub recovered_cells: usize,
}

impl SourceReport {
    fn new(metric: Metric, path: &Path, parsed: &WideSeries) -> Self {
        Self {
            metric,
            path: path.to_path_buf(),
            sha256: parsed.digest.clone(),
            rows: parsed.stats.rows,
            date_columns: parsed.stats.date_columns,
            keys: parsed.series.len(),
            recovered_cells: parsed.stats.recovered_cells,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub sources: Vec<SourceReport>,
    pub facts: usize,
    pub commit: CommitSummary,
    pub elapsed_ms: u128,
}

/// Runs parse, merge and commit for one validated configuration.
///
/// Both files are parsed before the store is opened, so a parse failure
/// never touches the store.
pub fn run_ingest(config: &IngestConfig) -> Result<IngestReport, PipelineError> {
    let span = info_span!("ingest", user = %config.store.user, store = %config.store.target());
    let _guard = span.enter();
    let start = Instant::now();

    let (cases, deaths) = rayon::join(
        || parse_source(Metric::Cases, &config.confirmed, &config.layout),
        || parse_source(Metric::Deaths, &config.deaths, &config.layout),
    );
    let (cases, deaths) = (cases?, deaths?);

    let rows = merge_series(&cases.series, &deaths.series);
    info!(facts = rows.len(), "series merged");

    let mut conn = config.store.open()?;
    let commit = commit_facts(&mut conn, &rows, &config.commit)?;

    let report = IngestReport {
        sources: vec![
            SourceReport::new(Metric::Cases, &config.confirmed, &cases),
            SourceReport::new(Metric::Deaths, &config.deaths, &deaths),
        ],
        facts: rows.len(),
        commit,
        elapsed_ms: start.elapsed().as_millis(),
    };
    info!(
        facts = report.facts,
        elapsed_ms = report.elapsed_ms as u64,
        "ingestion complete"
    );
    Ok(report)
}

fn parse_source(
    metric: Metric,
    path: &Path,
    layout: &SeriesLayout,
) -> Result<WideSeries, PipelineError> {
    let span = info_span!("parse", %metric, path = %path.display());
    let _guard = span.enter();
    let parsed = read_wide_series(path, layout)
        .map_err(|source| PipelineError::Parse { metric, source })?;
    info!(
        rows = parsed.stats.rows,
        keys = parsed.series.len(),
        recovered_cells = parsed.stats.recovered_cells,
        "series parsed"
    );
    Ok(parsed)
}
