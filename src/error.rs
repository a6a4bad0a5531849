//! Error type shared by the dataset loader, configuration and the explorer engine.
//!
//! Missing measurements are never errors: they travel as `None` through the
//! projection arithmetic. This enum only covers I/O, parsing and rejected
//! parameter input.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::gas::Gas;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to load dataset from '{path}': {source}")]
    DatasetLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown gas '{0}'")]
    UnknownGas(String),

    #[error("Gas 1 and gas 2 must differ (both are '{0}')")]
    SameGas(Gas),

    #[error("Invalid working capacity range: p1 = {p1} is above p2 = {p2}")]
    InvalidRange { p1: usize, p2: usize },

    #[error("Selection index {index} is out of range for a table of {rows} rows")]
    SelectionOutOfRange { index: usize, rows: usize },

    #[error("Isotherm '{reference}' could not be resolved: {reason}")]
    Isotherm { reference: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
