//! Panel projection and simulated sensor readings.
//!
//! Power and current follow from the forecast; temperature and humidity are
//! placeholder waveforms indexed by position and carry no physical model.

use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;

/// Projects an inverse-normalized power value onto the nominal panel:
/// `(value / data_range) * rated_watts`.
pub fn project_to_panel(value: f64, data_range: f64, rated_watts: f64) -> f64 {
    (value / data_range) * rated_watts
}

/// [`project_to_panel`] over a whole series
pub fn project_series(values: &[f64], data_range: f64, rated_watts: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| project_to_panel(v, data_range, rated_watts))
        .collect()
}

/// `n` evenly spaced points from `start` to `stop`, both ends included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One simulated monitoring sample.
///
/// Field names match the JSON payload the field logger posts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Volts
    pub voltage: f64,
    /// Amperes
    pub current: f64,
    /// Watts
    pub power: f64,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl SensorReading {
    /// The reading rounded to the logger's payload precision
    /// (V 2, A 3, W 2, °C 1, % 1 decimals).
    pub fn to_payload(&self) -> Self {
        Self {
            voltage: round_to(self.voltage, 2),
            current: round_to(self.current, 3),
            power: round_to(self.power, 2),
            temperature: round_to(self.temperature, 1),
            humidity: round_to(self.humidity, 1),
        }
    }
}

/// Derives one reading per panel-scale power value.
///
/// Voltage is the constant bus voltage and current is `power / voltage`.
/// Temperature is `base + amplitude * sin(phase)` and humidity
/// `base + amplitude * cos(phase)`, with the phase running linearly from 0 to
/// `waveform_span` across the series.
pub fn simulate_readings(panel_power: &[f64], panel: &PanelConfig) -> Vec<SensorReading> {
    let phases = linspace(0.0, panel.waveform_span, panel_power.len());

    panel_power
        .iter()
        .zip(phases)
        .map(|(&power, phase)| SensorReading {
            voltage: panel.bus_voltage,
            current: power / panel.bus_voltage,
            power,
            temperature: panel.temperature_base + panel.temperature_amplitude * phase.sin(),
            humidity: panel.humidity_base + panel.humidity_amplitude * phase.cos(),
        })
        .collect()
}
