//! Library half of the `epi` binary: argument model, configuration
//! validation, logging setup and the ingestion driver.

pub mod cli;
pub mod config;
pub mod logging;
pub mod pipeline;
