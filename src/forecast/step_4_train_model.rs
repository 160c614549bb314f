// External imports
use burn::module::AutodiffModule;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Tensor};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// Internal imports
use super::step_1_tensor_preparation::WindowedSamples;
use super::step_2_recurrent_cell::CellKind;
use super::step_3_forecaster_arch::RecurrentForecaster;
use crate::config::TrainingConfig;
use crate::error::{ForecastError, Result};

/// Adam epsilon (1e-7)
const ADAM_EPSILON: f32 = 1e-7;

/// Per-epoch losses recorded while training one forecaster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// Mean mini-batch MSE over each epoch
    pub loss: Vec<f64>,
    /// MSE on the validation windows after each epoch
    pub val_loss: Vec<f64>,
}

impl TrainingHistory {
    pub fn epochs(&self) -> usize {
        self.loss.len()
    }
}

/// A forecaster that has completed training.
///
/// Only [`train_forecaster`] produces one, so inference can never run on
/// untrained weights. Holds the inference copy of the model (no autodiff
/// graph) and is read-only.
#[derive(Debug)]
pub struct TrainedForecaster<B: Backend> {
    pub(crate) model: RecurrentForecaster<B>,
    history: TrainingHistory,
    training_time: Duration,
}

impl<B: Backend> TrainedForecaster<B> {
    pub fn kind(&self) -> CellKind {
        self.model.kind()
    }

    pub fn model(&self) -> &RecurrentForecaster<B> {
        &self.model
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn training_time(&self) -> Duration {
        self.training_time
    }
}

/// Mean squared error of a model over a full feature/target set
pub fn evaluate_mse<B: Backend>(
    model: &RecurrentForecaster<B>,
    features: Tensor<B, 3>,
    targets: Tensor<B, 2>,
) -> f64 {
    let predictions = model.forward(features);
    model
        .mse_loss(predictions, targets)
        .into_scalar()
        .elem::<f64>()
}

/// Train a forecaster of the given kind
///
/// Mini-batch Adam against MSE. Training windows are reshuffled every epoch
/// with an RNG seeded from the config; the validation windows are scored
/// after every epoch and never influence the weights.
///
/// # Arguments
///
/// * `kind` - Recurrent cell variant
/// * `train` - Training windows
/// * `validation` - Held-out windows scored after each epoch
/// * `config` - Architecture and optimizer settings
/// * `device` - Device to train on
///
/// # Returns
///
/// The trained forecaster (inference backend) with its loss history
pub fn train_forecaster<B: AutodiffBackend>(
    kind: CellKind,
    train: &WindowedSamples,
    validation: &WindowedSamples,
    config: &TrainingConfig,
    device: &B::Device,
) -> Result<TrainedForecaster<B::InnerBackend>> {
    if train.is_empty() {
        return Err(ForecastError::Numeric(format!(
            "{} forecaster has no training samples",
            kind
        )));
    }
    if config.batch_size == 0 {
        return Err(ForecastError::Config(
            "training.batch_size: must be > 0".to_string(),
        ));
    }

    info!(
        "Training {} forecaster: hidden_size={}, epochs={}, batch_size={}, lr={}, train={}, validation={}",
        kind,
        config.hidden_size,
        config.epochs,
        config.batch_size,
        config.learning_rate,
        train.len(),
        validation.len()
    );

    B::seed(config.seed);
    let mut model = RecurrentForecaster::<B>::new(kind, 1, config.hidden_size, device);
    let mut optimizer = AdamConfig::new().with_epsilon(ADAM_EPSILON).init();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let validation_tensors = if validation.is_empty() {
        None
    } else {
        Some(validation.to_tensors::<B::InnerBackend>(device))
    };

    let mut indices: Vec<usize> = (0..train.len()).collect();
    let mut history = TrainingHistory::default();
    let started = Instant::now();

    for epoch in 1..=config.epochs {
        if config.shuffle {
            indices.shuffle(&mut rng);
        }

        let mut epoch_loss = 0.0;
        let mut batches = 0usize;
        for batch_indices in indices.chunks(config.batch_size) {
            let (batch_features, batch_targets) = train.select(batch_indices).to_tensors::<B>(device);

            // Forward pass
            let predictions = model.forward(batch_features);
            let loss_tensor = model.mse_loss(predictions, batch_targets);
            epoch_loss += loss_tensor.clone().into_scalar().elem::<f64>();
            batches += 1;

            // Backward pass and optimizer step
            let grads = loss_tensor.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optimizer.step(config.learning_rate, model, grads);
        }
        let avg_loss = epoch_loss / batches as f64;

        let val_loss = match &validation_tensors {
            Some((features, targets)) => {
                evaluate_mse(&model.valid(), features.clone(), targets.clone())
            }
            None => f64::NAN,
        };

        info!(
            "[{}] Epoch {}/{} - loss: {:.6} - val_loss: {:.6}",
            kind, epoch, config.epochs, avg_loss, val_loss
        );
        if !avg_loss.is_finite() || (validation_tensors.is_some() && !val_loss.is_finite()) {
            warn!("[{}] Non-finite loss at epoch {}", kind, epoch);
        }

        history.loss.push(avg_loss);
        history.val_loss.push(val_loss);
    }

    let training_time = started.elapsed();
    info!(
        "{} training finished in {:.2}s",
        kind,
        training_time.as_secs_f64()
    );

    Ok(TrainedForecaster {
        model: model.valid(),
        history,
        training_time,
    })
}
