//! The single forward pass: load, normalize, window, train both forecasters,
//! evaluate on the panel scale and publish the artifacts.

use std::path::{Path, PathBuf};

use burn::tensor::backend::{AutodiffBackend, Backend};
use log::info;

use crate::config::{DataConfig, PipelineConfig};
use crate::constants::{LOSS_CHART_FILE_NAME, PREDICTION_CHART_FILE_NAME};
use crate::error::{ForecastError, Result};
use crate::forecast::step_1_tensor_preparation::{build_windows, split_ordered, train_len, WindowedSamples};
use crate::forecast::{train_forecaster, CellKind, TrainedForecaster};
use crate::panel::{charts, report, project_series, simulate_readings, SensorReading};
use crate::util::file_utils::{load_power_series, PowerSeries};
use crate::util::metrics::ForecastAccuracy;
use crate::util::model_logger::ModelExperiment;
use crate::util::pre_processor::MinMaxScaler;

/// Normalized, windowed and split input shared by both forecasters
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub series: PowerSeries,
    pub scaler: MinMaxScaler,
    pub train: WindowedSamples,
    pub test: WindowedSamples,
}

/// Result of training and evaluating one forecaster
#[derive(Debug)]
pub struct ForecastOutcome<B: Backend> {
    pub forecaster: TrainedForecaster<B>,
    /// Test-set predictions in the source units (watts)
    pub predicted_watts: Vec<f64>,
    /// Test-set predictions projected onto the nominal panel
    pub panel_power: Vec<f64>,
    pub accuracy: Option<ForecastAccuracy>,
}

impl<B: Backend> ForecastOutcome<B> {
    pub fn kind(&self) -> CellKind {
        self.forecaster.kind()
    }
}

/// Everything a run produces before it is printed or written
#[derive(Debug)]
pub struct PipelineReport<B: Backend> {
    pub prepared: PreparedData,
    /// Test-set targets projected onto the nominal panel
    pub actual_panel: Vec<f64>,
    /// Simulated readings derived from `actual_panel`
    pub readings: Vec<SensorReading>,
    pub outcomes: Vec<ForecastOutcome<B>>,
}

/// Files written by [`write_artifacts`]
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub loss_chart: PathBuf,
    pub prediction_chart: PathBuf,
    pub experiments: Vec<PathBuf>,
    pub readings: Option<PathBuf>,
}

/// Smallest series length that yields at least one train and one test window,
/// or `None` when `train_fraction` is outside (0, 1)
pub fn minimum_observations(window_length: usize, train_fraction: f64) -> Option<usize> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return None;
    }

    // floor(1 / fraction) never exceeds the answer and is at most one short of it
    let mut samples = ((1.0 / train_fraction).floor() as usize).max(2);
    loop {
        let train = train_len(samples, train_fraction);
        if train >= 1 && samples - train >= 1 {
            return Some(window_length.saturating_add(samples));
        }
        samples = samples.checked_add(1)?;
    }
}

/// Fits the scaler on the whole series, normalizes it, builds windows and
/// splits them in time order.
///
/// # Errors
///
/// `InsufficientData` when the series cannot fill a train and a test window,
/// `DegenerateRange` when every reading is identical.
pub fn prepare_data(series: PowerSeries, data: &DataConfig) -> Result<PreparedData> {
    let required = minimum_observations(data.window_length, data.train_fraction).ok_or_else(|| {
        ForecastError::Config(format!(
            "data.train_fraction: must be in (0.0, 1.0), got {}",
            data.train_fraction
        ))
    })?;
    if series.len() < required {
        return Err(ForecastError::InsufficientData {
            required,
            available: series.len(),
            window_length: data.window_length,
        });
    }

    let scaler = MinMaxScaler::fit(series.values())?;
    if scaler.data_range().abs() < f64::EPSILON {
        return Err(ForecastError::DegenerateRange {
            value: scaler.min(),
        });
    }
    info!(
        "Fitted scaler: min={:.3}, max={:.3}, range={:.3}",
        scaler.min(),
        scaler.max(),
        scaler.data_range()
    );

    let normalized = scaler.transform_all(series.values());
    let windows = build_windows(&normalized, data.window_length);
    let (train, test) = split_ordered(&windows, data.train_fraction);
    info!(
        "Built {} windows of length {}: train samples: {}, test samples: {}",
        windows.len(),
        data.window_length,
        train.len(),
        test.len()
    );

    Ok(PreparedData {
        series,
        scaler,
        train,
        test,
    })
}

/// Trains every forecaster kind on the prepared windows and evaluates each on
/// the test windows in panel watts.
pub fn run_forecasts<B: AutodiffBackend>(
    prepared: &PreparedData,
    config: &PipelineConfig,
    device: &B::Device,
) -> Result<PipelineReport<B::InnerBackend>> {
    let scaler = &prepared.scaler;
    let range = scaler.data_range();
    let rated = config.panel.rated_watts;

    let actual_watts: Vec<f64> = prepared
        .test
        .targets()
        .iter()
        .map(|&v| scaler.inverse_transform(v as f64))
        .collect();
    let actual_panel = project_series(&actual_watts, range, rated);

    let mut outcomes = Vec::with_capacity(CellKind::ALL.len());
    for kind in CellKind::ALL {
        let forecaster = train_forecaster::<B>(
            kind,
            &prepared.train,
            &prepared.test,
            &config.training,
            device,
        )?;

        let predicted_watts = forecaster.predict_denormalized(&prepared.test, scaler, device)?;
        let panel_power = project_series(&predicted_watts, range, rated);
        let accuracy = ForecastAccuracy::compute(&actual_panel, &panel_power);
        if let Some(acc) = &accuracy {
            info!(
                "{} test accuracy on {:.0} W panel: RMSE {:.3} W, MAE {:.3} W",
                kind, rated, acc.rmse, acc.mae
            );
        }

        outcomes.push(ForecastOutcome {
            forecaster,
            predicted_watts,
            panel_power,
            accuracy,
        });
    }

    let readings = simulate_readings(&actual_panel, &config.panel);

    Ok(PipelineReport {
        prepared: prepared.clone(),
        actual_panel,
        readings,
        outcomes,
    })
}

/// Loads the CSV and runs the whole forecasting pass
pub fn run<B: AutodiffBackend>(
    csv_path: &Path,
    config: &PipelineConfig,
    device: &B::Device,
) -> Result<PipelineReport<B::InnerBackend>> {
    config.ensure_valid()?;

    let series = load_power_series(csv_path, &config.data.power_column)?;
    let prepared = prepare_data(series, &config.data)?;
    run_forecasts::<B>(&prepared, config, device)
}

fn save_experiment<B: Backend>(
    outcome: &ForecastOutcome<B>,
    report: &PipelineReport<B>,
    config: &PipelineConfig,
) -> Result<PathBuf> {
    let mut experiment = ModelExperiment::new(
        outcome.kind().name(),
        config.data.window_length,
        &config.training,
        report.prepared.train.len(),
        report.prepared.test.len(),
    );
    experiment.set_validation_losses(&outcome.forecaster.history().val_loss);
    experiment.set_training_time(outcome.forecaster.training_time().as_secs_f64());
    if let Some(acc) = &outcome.accuracy {
        experiment.set_test_accuracy(acc);
    }
    experiment.add_note(&format!(
        "source column '{}', {} readings, panel {} W",
        report.prepared.series.column(),
        report.prepared.series.len(),
        config.panel.rated_watts
    ));

    experiment
        .save(&config.output.dir)
        .map_err(|e| ForecastError::Output {
            path: config.output.dir.clone(),
            message: e.to_string(),
        })
}

/// Prints the monitoring table and writes charts, experiment records and the
/// optional readings export.
pub fn write_artifacts<B: Backend>(
    report: &PipelineReport<B>,
    config: &PipelineConfig,
) -> Result<Artifacts> {
    let out_dir = &config.output.dir;
    std::fs::create_dir_all(out_dir).map_err(|e| ForecastError::Output {
        path: out_dir.clone(),
        message: e.to_string(),
    })?;

    report::print_monitoring_table(&report.readings, config.output.table_rows)?;

    let loss_curves: Vec<(CellKind, &[f64])> = report
        .outcomes
        .iter()
        .map(|o| (o.kind(), o.forecaster.history().val_loss.as_slice()))
        .collect();
    let loss_chart = out_dir.join(LOSS_CHART_FILE_NAME);
    charts::render_loss_comparison(&loss_chart, &loss_curves)?;
    info!("Wrote {}", loss_chart.display());

    let predictions: Vec<(CellKind, &[f64])> = report
        .outcomes
        .iter()
        .map(|o| (o.kind(), o.panel_power.as_slice()))
        .collect();
    let prediction_chart = out_dir.join(PREDICTION_CHART_FILE_NAME);
    charts::render_prediction_comparison(
        &prediction_chart,
        &report.actual_panel,
        &predictions,
        config.output.chart_y_max,
    )?;
    info!("Wrote {}", prediction_chart.display());

    let experiments = report
        .outcomes
        .iter()
        .map(|outcome| save_experiment(outcome, report, config))
        .collect::<Result<Vec<_>>>()?;

    let readings = match &config.output.readings_path {
        Some(path) => {
            report::export_readings(&report.readings, path)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(Artifacts {
        loss_chart,
        prediction_chart,
        experiments,
        readings,
    })
}
