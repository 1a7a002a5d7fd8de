//! Validation of invocation parameters into run configuration.
//!
//! Nothing here touches the filesystem or the store: a run with missing
//! parameters fails before any I/O.

use std::path::{Path, PathBuf};

use thiserror::Error;

use epi_ingest::SeriesLayout;
use epi_store::{CommitOptions, Credential, StoreConfig};

use crate::cli::{IngestArgs, StoreArgs};

/// Invalid or missing invocation parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required flags were not given (or were blank).
    #[error("missing required arguments: {}", format_flags(.flags))]
    MissingArguments { flags: Vec<&'static str> },

    /// A flag was given a value that cannot be used.
    #[error("invalid value for --{flag}: {reason}")]
    InvalidArgument { flag: &'static str, reason: String },
}

fn format_flags(flags: &[&'static str]) -> String {
    flags
        .iter()
        .map(|flag| format!("--{flag}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything a single ingestion run needs.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub confirmed: PathBuf,
    pub deaths: PathBuf,
    pub store: StoreConfig,
    pub layout: SeriesLayout,
    pub commit: CommitOptions,
}

impl IngestConfig {
    /// Validates `ingest` arguments, reporting every missing flag at once.
    pub fn from_args(args: &IngestArgs) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let confirmed = present_path(args.confirmed.as_deref(), "confirmed", &mut missing);
        let deaths = present_path(args.deaths.as_deref(), "deaths", &mut missing);
        let store = store_parts(&args.store, &mut missing);
        let (confirmed, deaths, (url, user, pass)) = match (confirmed, deaths, store) {
            (Some(confirmed), Some(deaths), Some(store)) => (confirmed, deaths, store),
            _ => return Err(ConfigError::MissingArguments { flags: missing }),
        };

        if args.label_column >= args.first_date_column {
            return Err(ConfigError::InvalidArgument {
                flag: "label-column",
                reason: format!(
                    "must be before --first-date-column ({})",
                    args.first_date_column
                ),
            });
        }
        if args.batch_size == 0 {
            return Err(ConfigError::InvalidArgument {
                flag: "batch-size",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            confirmed,
            deaths,
            store: StoreConfig::new(url, user, Credential::new(pass)),
            layout: SeriesLayout::new(args.label_column, args.first_date_column),
            commit: CommitOptions {
                batch_size: args.batch_size,
            },
        })
    }
}

/// Validates the store connection flags on their own.
pub fn store_config(args: &StoreArgs) -> Result<StoreConfig, ConfigError> {
    let mut missing = Vec::new();
    match store_parts(args, &mut missing) {
        Some((url, user, pass)) => Ok(StoreConfig::new(url, user, Credential::new(pass))),
        None => Err(ConfigError::MissingArguments { flags: missing }),
    }
}

fn store_parts(
    args: &StoreArgs,
    missing: &mut Vec<&'static str>,
) -> Option<(String, String, String)> {
    let url = present(args.db.as_deref(), "db", missing);
    let user = present(args.user.as_deref(), "user", missing);
    let pass = present(args.pass.as_deref(), "pass", missing);
    Some((url?, user?, pass?))
}

fn present(value: Option<&str>, flag: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ => {
            missing.push(flag);
            None
        }
    }
}

fn present_path(
    value: Option<&Path>,
    flag: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<PathBuf> {
    match value {
        Some(path) if !path.as_os_str().is_empty() => Some(path.to_path_buf()),
        _ => {
            missing.push(flag);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> IngestArgs {
        IngestArgs {
            confirmed: Some(PathBuf::from("confirmed.csv")),
            deaths: Some(PathBuf::from("deaths.csv")),
            store: StoreArgs {
                db: Some("sqlite://epi.db".to_string()),
                user: Some("loader".to_string()),
                pass: Some("secret".to_string()),
            },
            label_column: 1,
            first_date_column: 4,
            batch_size: 500,
            json: false,
        }
    }

    #[test]
    fn complete_arguments_validate() {
        let config = IngestConfig::from_args(&full_args()).unwrap();
        assert_eq!(config.confirmed, PathBuf::from("confirmed.csv"));
        assert_eq!(config.store.user, "loader");
        assert_eq!(config.store.credential.expose(), "secret");
        assert_eq!(config.commit.batch_size, 500);
        assert_eq!(config.layout, SeriesLayout::default());
    }

    #[test]
    fn every_missing_flag_is_reported() {
        let mut args = full_args();
        args.deaths = None;
        args.store.user = Some("   ".to_string());
        args.store.pass = None;
        let err = IngestConfig::from_args(&args).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingArguments {
                flags: vec!["deaths", "user", "pass"]
            }
        );
        assert_eq!(
            err.to_string(),
            "missing required arguments: --deaths, --user, --pass"
        );
    }

    #[test]
    fn rejects_zero_batch_and_overlapping_layout() {
        let mut args = full_args();
        args.batch_size = 0;
        assert!(matches!(
            IngestConfig::from_args(&args),
            Err(ConfigError::InvalidArgument {
                flag: "batch-size",
                ..
            })
        ));

        let mut args = full_args();
        args.label_column = 4;
        assert!(matches!(
            IngestConfig::from_args(&args),
            Err(ConfigError::InvalidArgument {
                flag: "label-column",
                ..
            })
        ));
    }

    #[test]
    fn store_flags_validate_alone() {
        let err = store_config(&StoreArgs::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingArguments {
                flags: vec!["db", "user", "pass"]
            }
        );
    }
}
