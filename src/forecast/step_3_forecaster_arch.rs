// External imports
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::Backend;
use burn::tensor::Tensor;

// Internal imports
use super::step_2_recurrent_cell::{CellKind, RecurrentCell};

/// # Recurrent Forecaster
///
/// One-step-ahead forecaster for a univariate series: a single recurrent
/// layer (simple or LSTM, see [`CellKind`]) whose final hidden state feeds
/// one linear output unit.
///
/// Input `[batch_size, seq_len, 1]`, output `[batch_size, 1]`, both in
/// normalized units.
#[derive(Module, Debug)]
pub struct RecurrentForecaster<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    cell: RecurrentCell<B>,
    output: Linear<B>,
}

impl<B: Backend> RecurrentForecaster<B> {
    /// Creates a forecaster with freshly initialized weights
    ///
    /// # Arguments
    ///
    /// * `kind` - Recurrent cell variant
    /// * `input_size` - Features per time step (1 for a univariate series)
    /// * `hidden_size` - Width of the recurrent layer
    /// * `device` - Device to allocate tensors on
    pub fn new(kind: CellKind, input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let cell = RecurrentCell::new(kind, input_size, hidden_size, device);
        let output = LinearConfig::new(hidden_size, 1).init(device);

        Self {
            input_size,
            hidden_size,
            cell,
            output,
        }
    }

    pub fn kind(&self) -> CellKind {
        self.cell.kind()
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let last_hidden = self.cell.forward(x);
        self.output.forward(last_hidden)
    }

    /// Mean squared error between predictions and targets
    pub fn mse_loss(&self, pred: Tensor<B, 2>, target: Tensor<B, 2>) -> Tensor<B, 1> {
        let diff = pred - target;
        (diff.clone() * diff).mean()
    }
}
