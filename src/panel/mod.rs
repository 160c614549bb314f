//! Evaluation and presentation on a nominal panel: projection, simulated
//! sensor readings, the monitoring table and the comparison charts.

pub mod charts;
pub mod report;
pub mod sensor_simulation;

pub use sensor_simulation::{project_series, project_to_panel, simulate_readings, SensorReading};
