// External crates
use log::{info, warn};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

// Internal modules
use crate::error::{ForecastError, Result};

/// An ordered power time series in watts, one reading per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSeries {
    column: String,
    values: Vec<f64>,
    dropped_nulls: usize,
}

impl PowerSeries {
    /// Wraps already-parsed readings, e.g. a synthetic series.
    pub fn new(column: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            column: column.into(),
            values,
            dropped_nulls: 0,
        }
    }

    /// Name of the CSV column the readings came from
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of empty cells skipped while loading
    pub fn dropped_nulls(&self) -> usize {
        self.dropped_nulls
    }
}

/// Resolves the requested column against the frame's header.
///
/// An exact match wins; otherwise the first case-insensitive match is used,
/// so a sheet exported with `power` satisfies a configured `POWER`.
pub fn resolve_column_name(df: &DataFrame, requested: &str) -> Option<String> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    if names.iter().any(|name| name == requested) {
        return Some(requested.to_string());
    }

    let wanted = requested.trim().to_lowercase();
    names
        .into_iter()
        .find(|name| name.trim().to_lowercase() == wanted)
}

/// Reads a CSV file with a header row into a DataFrame
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
///
/// # Returns
///
/// Returns the parsed DataFrame, or `ForecastError::Io` / `ForecastError::Csv`
pub fn read_csv_file<P: AsRef<Path>>(file_path: P) -> Result<DataFrame> {
    let path = file_path.as_ref();
    let file = File::open(path).map_err(|source| ForecastError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Infer over every row: logs often open with integer night-time zeros
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(file)
        .finish()?;
    Ok(df)
}

/// Extracts the power column of a DataFrame as an ordered series.
///
/// Null cells are dropped with a warning. Cells that cannot be read as numbers
/// fail the strict cast and surface as `ForecastError::Csv`; NaN or infinite
/// readings surface as `ForecastError::NonFinite`.
pub fn extract_power_series(df: &DataFrame, requested: &str) -> Result<PowerSeries> {
    let column = resolve_column_name(df, requested).ok_or_else(|| ForecastError::MissingColumn {
        column: requested.to_string(),
        available: df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
    })?;

    let series = df
        .column(&column)?
        .as_materialized_series()
        .strict_cast(&DataType::Float64)?;
    let chunked = series.f64()?;

    let mut values = Vec::with_capacity(chunked.len());
    let mut dropped_nulls = 0;
    for (row, value) in chunked.into_iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => values.push(v),
            Some(_) => {
                return Err(ForecastError::NonFinite {
                    column: column.clone(),
                    row,
                })
            }
            None => dropped_nulls += 1,
        }
    }

    if dropped_nulls > 0 {
        warn!(
            "Dropped {} empty cells from column '{}'",
            dropped_nulls, column
        );
    }
    if values.is_empty() {
        return Err(ForecastError::EmptySeries { column });
    }

    Ok(PowerSeries {
        column,
        values,
        dropped_nulls,
    })
}

/// Load the power series from a CSV file
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
/// * `column` - Name of the power column
///
/// # Returns
///
/// Returns the ordered readings of the resolved column
pub fn load_power_series<P: AsRef<Path>>(file_path: P, column: &str) -> Result<PowerSeries> {
    let path = file_path.as_ref();
    info!("Loading data from: {}", path.display());

    let df = read_csv_file(path)?;
    info!(
        "Read {} rows with columns {:?}",
        df.height(),
        df.get_column_names()
    );

    let series = extract_power_series(&df, column)?;
    info!(
        "Using column '{}' with {} readings",
        series.column(),
        series.len()
    );
    Ok(series)
}
