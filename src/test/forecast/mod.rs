/// Tests for the recurrent forecasting module
///
/// * Stride-1 windowing, ordered splitting and tensor shapes
/// * Forward pass shapes for both cell kinds
/// * Training behaviour on a constant series and read-only prediction
pub mod test_forecaster;
pub mod test_tensor_preparation;
