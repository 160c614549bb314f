/// # Recurrent Forecasting Module
///
/// One-step-ahead forecasting of a univariate power series with a single
/// recurrent layer. The simple RNN and LSTM variants share every piece of
/// code except the per-step recurrence, selected by
/// [`step_2_recurrent_cell::CellKind`].
///
/// ## Module Structure:
///
/// 1. **step_1_tensor_preparation**: Stride-1 windowing, ordered train/test split, tensor conversion
/// 2. **step_2_recurrent_cell**: Simple and LSTM recurrences behind one cell type
/// 3. **step_3_forecaster_arch**: Recurrent layer followed by a linear output unit
/// 4. **step_4_train_model**: Mini-batch Adam training with per-epoch validation loss
/// 5. **step_5_prediction**: Read-only inference on trained forecasters
pub mod step_1_tensor_preparation;
pub mod step_2_recurrent_cell;
pub mod step_3_forecaster_arch;
pub mod step_4_train_model;
pub mod step_5_prediction;

pub use step_1_tensor_preparation::{build_windows, split_ordered, WindowedSamples};
pub use step_2_recurrent_cell::CellKind;
pub use step_3_forecaster_arch::RecurrentForecaster;
pub use step_4_train_model::{train_forecaster, TrainedForecaster, TrainingHistory};
