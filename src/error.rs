// External crates
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the forecasting pipeline.
///
/// Variants fall into three groups, checked in this order during a run:
///
/// * input format (`Io`, `Csv`, `MissingColumn`, `EmptySeries`, `NonFinite`, `Config`),
///   raised before any computation
/// * insufficient data (`InsufficientData`, `DegenerateRange`), raised before training
/// * numeric failures (`Numeric`), raised from inside training or inference
///
/// `Chart` and `Output` cover writing the run's artifacts.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV input: {0}")]
    Csv(#[from] PolarsError),

    #[error("column '{column}' not found, available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("column '{column}' has no values")]
    EmptySeries { column: String },

    #[error("column '{column}' holds a non-finite value at row {row}")]
    NonFinite { column: String, row: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(
        "need at least {required} observations for a {window_length}-step window with non-empty train and test sets, got {available}"
    )]
    InsufficientData {
        required: usize,
        available: usize,
        window_length: usize,
    },

    #[error("power series is constant at {value} W, panel projection is undefined")]
    DegenerateRange { value: f64 },

    #[error("numeric failure: {0}")]
    Numeric(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("failed to write {path}: {message}")]
    Output { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ForecastError>;
