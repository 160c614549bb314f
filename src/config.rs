//! TOML-based run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants;
use crate::error::{ForecastError, Result};

/// Top-level configuration for one forecasting run.
///
/// Every field defaults to the values in [`crate::constants`], so an empty
/// TOML document (or no file at all) reproduces the reference run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input column and windowing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Name of the power column, matched case-insensitively as a fallback.
    pub power_column: String,
    /// History length of every window sample.
    pub window_length: usize,
    /// Fraction of windows (in time order) used for training.
    pub train_fraction: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            power_column: constants::POWER_COLUMN.to_string(),
            window_length: constants::SEQUENCE_LENGTH,
            train_fraction: constants::TRAIN_SPLIT_RATIO,
        }
    }
}

/// Forecaster architecture and optimizer settings, shared by both cell kinds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    pub hidden_size: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Reshuffle training windows every epoch.
    pub shuffle: bool,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            hidden_size: constants::HIDDEN_SIZE,
            epochs: constants::EPOCHS,
            batch_size: constants::BATCH_SIZE,
            learning_rate: constants::LEARNING_RATE,
            shuffle: true,
            seed: constants::SHUFFLE_SEED,
        }
    }
}

/// Nominal panel used to project predictions and derive simulated readings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    pub rated_watts: f64,
    pub bus_voltage: f64,
    pub temperature_base: f64,
    pub temperature_amplitude: f64,
    pub humidity_base: f64,
    pub humidity_amplitude: f64,
    /// End point of the phase ramp driving the placeholder waveforms.
    pub waveform_span: f64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rated_watts: constants::PANEL_RATED_WATTS,
            bus_voltage: constants::BUS_VOLTAGE,
            temperature_base: constants::TEMPERATURE_BASE_C,
            temperature_amplitude: constants::TEMPERATURE_AMPLITUDE_C,
            humidity_base: constants::HUMIDITY_BASE_PCT,
            humidity_amplitude: constants::HUMIDITY_AMPLITUDE_PCT,
            waveform_span: constants::WAVEFORM_SPAN,
        }
    }
}

/// Where artifacts go and how much of the table is printed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub table_rows: usize,
    pub chart_y_max: f64,
    /// Optional JSON export of every simulated reading.
    pub readings_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::OUTPUT_DIR),
            table_rows: constants::TABLE_PREVIEW_ROWS,
            chart_y_max: constants::PREDICTION_CHART_Y_MAX,
            readings_path: None,
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Io` if the file cannot be read and
    /// `ForecastError::Config` if the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ForecastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Config` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ForecastError::Config(e.to_string()))
    }

    /// Checks value ranges and returns every violation found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let d = &self.data;
        if d.power_column.trim().is_empty() {
            errors.push("data.power_column: must not be empty".to_string());
        }
        if d.window_length == 0 {
            errors.push("data.window_length: must be > 0".to_string());
        }
        if !(d.train_fraction > 0.0 && d.train_fraction < 1.0) {
            errors.push(format!(
                "data.train_fraction: must be in (0.0, 1.0), got {}",
                d.train_fraction
            ));
        }

        let t = &self.training;
        if t.hidden_size == 0 {
            errors.push("training.hidden_size: must be > 0".to_string());
        }
        if t.epochs == 0 {
            errors.push("training.epochs: must be > 0".to_string());
        }
        if t.batch_size == 0 {
            errors.push("training.batch_size: must be > 0".to_string());
        }
        if !(t.learning_rate > 0.0 && t.learning_rate.is_finite()) {
            errors.push(format!(
                "training.learning_rate: must be a positive number, got {}",
                t.learning_rate
            ));
        }

        let p = &self.panel;
        if !(p.rated_watts > 0.0) {
            errors.push(format!("panel.rated_watts: must be > 0, got {}", p.rated_watts));
        }
        if !(p.bus_voltage > 0.0) {
            errors.push(format!("panel.bus_voltage: must be > 0, got {}", p.bus_voltage));
        }

        if !(self.output.chart_y_max > 0.0) {
            errors.push(format!(
                "output.chart_y_max: must be > 0, got {}",
                self.output.chart_y_max
            ));
        }

        errors
    }

    /// Like [`validate`](Self::validate) but folds violations into one error.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ForecastError::Config(errors.join("; ")))
        }
    }
}
