// External crates
use log::info;
use polars::prelude::*;
use std::fs;
use std::path::Path;

// Internal modules
use super::sensor_simulation::SensorReading;
use crate::error::{ForecastError, Result};

pub const VOLTAGE_HEADER: &str = "Voltage (V)";
pub const CURRENT_HEADER: &str = "Current (A)";
pub const POWER_HEADER: &str = "Power (W)";
pub const TEMPERATURE_HEADER: &str = "Temperature (°C)";
pub const HUMIDITY_HEADER: &str = "Humidity (%)";

/// Builds the monitoring table, one row per reading
pub fn readings_to_dataframe(readings: &[SensorReading]) -> Result<DataFrame> {
    let column = |name: &str, f: fn(&SensorReading) -> f64| -> Column {
        Series::new(name.into(), readings.iter().map(f).collect::<Vec<f64>>()).into()
    };

    let df = DataFrame::new(vec![
        column(VOLTAGE_HEADER, |r| r.voltage),
        column(CURRENT_HEADER, |r| r.current),
        column(POWER_HEADER, |r| r.power),
        column(TEMPERATURE_HEADER, |r| r.temperature),
        column(HUMIDITY_HEADER, |r| r.humidity),
    ])?;
    Ok(df)
}

/// Prints the first `rows` readings as a table
pub fn print_monitoring_table(readings: &[SensorReading], rows: usize) -> Result<()> {
    let df = readings_to_dataframe(readings)?;
    println!("Sample of Real-Time Monitoring Table:");
    println!("{}", df.head(Some(rows)));
    Ok(())
}

/// Writes every reading, rounded to payload precision, as a JSON array
pub fn export_readings(readings: &[SensorReading], path: &Path) -> Result<()> {
    let output_error = |message: String| ForecastError::Output {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| output_error(e.to_string()))?;
    }

    let payload: Vec<SensorReading> = readings.iter().map(SensorReading::to_payload).collect();
    let json = serde_json::to_string_pretty(&payload).map_err(|e| output_error(e.to_string()))?;
    fs::write(path, json).map_err(|e| output_error(e.to_string()))?;

    info!("Exported {} readings to {}", payload.len(), path.display());
    Ok(())
}
