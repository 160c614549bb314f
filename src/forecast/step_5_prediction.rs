// External imports
use burn::tensor::backend::Backend;

// Internal imports
use super::step_1_tensor_preparation::WindowedSamples;
use super::step_4_train_model::TrainedForecaster;
use crate::error::{ForecastError, Result};
use crate::util::pre_processor::MinMaxScaler;

impl<B: Backend> TrainedForecaster<B> {
    /// Predicts the normalized next value for every history in `samples`
    ///
    /// Read-only: the weights are never touched. An empty sample set yields
    /// an empty prediction list.
    pub fn predict(&self, samples: &WindowedSamples, device: &B::Device) -> Result<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let features = samples.histories_tensor::<B>(device);
        let predictions = self.model.forward(features);

        predictions
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| {
                ForecastError::Numeric(format!(
                    "failed to read {} predictions: {:?}",
                    self.kind(),
                    e
                ))
            })
    }

    /// Predicts and maps the results back to the scaler's source units (watts)
    pub fn predict_denormalized(
        &self,
        samples: &WindowedSamples,
        scaler: &MinMaxScaler,
        device: &B::Device,
    ) -> Result<Vec<f64>> {
        let normalized = self.predict(samples, device)?;
        Ok(normalized
            .into_iter()
            .map(|v| scaler.inverse_transform(v as f64))
            .collect())
    }
}
