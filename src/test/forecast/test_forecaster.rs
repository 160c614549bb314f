use burn_autodiff::Autodiff;
use burn_ndarray::NdArray;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::config::TrainingConfig;
use crate::forecast::step_1_tensor_preparation::{build_windows, split_ordered};
use crate::forecast::step_2_recurrent_cell::{CellKind, RecurrentCell};
use crate::forecast::step_3_forecaster_arch::RecurrentForecaster;
use crate::forecast::step_4_train_model::{evaluate_mse, train_forecaster};
use crate::util::pre_processor::MinMaxScaler;

type TestBackend = NdArray<f32>;
type TrainBackend = Autodiff<NdArray<f32>>;

fn quick_config(epochs: usize, learning_rate: f64) -> TrainingConfig {
    TrainingConfig {
        hidden_size: 16,
        epochs,
        batch_size: 16,
        learning_rate,
        shuffle: true,
        seed: 7,
    }
}

#[test]
fn test_cell_kind_metadata() {
    assert_eq!(CellKind::SimpleRnn.gate_count(), 1);
    assert_eq!(CellKind::Lstm.gate_count(), 4);
    assert_eq!(CellKind::Lstm.name(), "lstm");
    assert_eq!(CellKind::SimpleRnn.to_string(), "RNN");
    assert_eq!(CellKind::ALL, [CellKind::SimpleRnn, CellKind::Lstm]);
    assert_eq!(
        serde_json::to_string(&CellKind::SimpleRnn).unwrap(),
        "\"simple_rnn\""
    );
}

#[test]
fn test_cell_reports_the_kind_it_was_built_with() {
    let device = <TestBackend as Backend>::Device::default();

    for kind in CellKind::ALL {
        assert_eq!(CellKind::ALL[kind.index()], kind);

        let cell = RecurrentCell::<TestBackend>::new(kind, 1, 3, &device);
        assert_eq!(cell.kind(), kind);
        assert_eq!(cell.hidden_size(), 3);
    }

    let indices: Vec<usize> = CellKind::ALL.iter().map(|k| k.index()).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn test_cell_forward_returns_last_hidden_state() {
    let device = <TestBackend as Backend>::Device::default();
    let input = Tensor::<TestBackend, 3>::ones([2, 6, 1], &device);

    for kind in CellKind::ALL {
        let cell = RecurrentCell::<TestBackend>::new(kind, 1, 5, &device);
        assert_eq!(cell.kind(), kind);

        let h = cell.forward(input.clone());
        assert_eq!(h.dims(), [2, 5]);

        // Both recurrences squash the hidden state into [-1, 1]
        let values = h.into_data().to_vec::<f32>().unwrap();
        assert!(values.iter().all(|v| v.abs() <= 1.0), "{kind}: {values:?}");
    }
}

#[test]
fn test_forecaster_output_shape() {
    let device = <TestBackend as Backend>::Device::default();
    let input = Tensor::<TestBackend, 3>::zeros([4, 30, 1], &device);

    for kind in CellKind::ALL {
        let model = RecurrentForecaster::<TestBackend>::new(kind, 1, 64, &device);
        assert_eq!(model.kind(), kind);
        assert_eq!(model.hidden_size(), 64);

        let out = model.forward(input.clone());
        assert_eq!(out.dims(), [4, 1]);
    }
}

#[test]
fn test_mse_loss_value() {
    let device = <TestBackend as Backend>::Device::default();
    let model = RecurrentForecaster::<TestBackend>::new(CellKind::SimpleRnn, 1, 4, &device);

    let pred = Tensor::<TestBackend, 2>::from_floats([[1.0], [3.0]], &device);
    let target = Tensor::<TestBackend, 2>::from_floats([[0.0], [1.0]], &device);
    let loss = model.mse_loss(pred, target).into_scalar();
    assert!((loss - 2.5).abs() < 1e-6);
}

#[test]
fn test_training_records_one_loss_per_epoch() {
    let device = <TrainBackend as Backend>::Device::default();
    let series: Vec<f64> = (0..60).map(|i| (i as f64 * 0.3).sin() * 0.5 + 0.5).collect();
    let windows = build_windows(&series, 8);
    let (train, test) = split_ordered(&windows, 0.8);

    for kind in CellKind::ALL {
        let trained =
            train_forecaster::<TrainBackend>(kind, &train, &test, &quick_config(3, 0.001), &device)
                .unwrap();
        assert_eq!(trained.kind(), kind);
        assert_eq!(trained.history().epochs(), 3);
        assert_eq!(trained.history().val_loss.len(), 3);
        assert!(trained.history().val_loss.iter().all(|v| v.is_finite()));

        let predictions = trained.predict(&test, &device).unwrap();
        assert_eq!(predictions.len(), test.len());
    }
}

#[test]
fn test_constant_series_converges_toward_constant() {
    let device = <TrainBackend as Backend>::Device::default();
    let series = vec![0.5f64; 90];
    let windows = build_windows(&series, 10);
    let (train, test) = split_ordered(&windows, 0.8);

    for kind in CellKind::ALL {
        let trained =
            train_forecaster::<TrainBackend>(kind, &train, &test, &quick_config(40, 0.01), &device)
                .unwrap();

        let history = trained.history();
        let first = history.val_loss[0];
        let last = *history.val_loss.last().unwrap();
        assert!(last < first, "{kind}: val loss went from {first} to {last}");

        let predictions = trained.predict(&test, &device).unwrap();
        let mean_abs_err = predictions.iter().map(|p| (p - 0.5).abs()).sum::<f32>()
            / predictions.len() as f32;
        assert!(mean_abs_err < 0.1, "{kind}: mean abs error {mean_abs_err}");
    }
}

#[test]
fn test_prediction_is_read_only_and_repeatable() {
    let device = <TrainBackend as Backend>::Device::default();
    let series: Vec<f64> = (0..50).map(|i| (i % 10) as f64 / 10.0).collect();
    let windows = build_windows(&series, 5);
    let (train, test) = split_ordered(&windows, 0.8);

    let trained = train_forecaster::<TrainBackend>(
        CellKind::Lstm,
        &train,
        &test,
        &quick_config(2, 0.001),
        &device,
    )
    .unwrap();

    let first = trained.predict(&test, &device).unwrap();
    let second = trained.predict(&test, &device).unwrap();
    assert_eq!(first, second);

    let (features, targets) = test.to_tensors::<TestBackend>(&device);
    let mse = evaluate_mse(trained.model(), features, targets);
    let last_val = *trained.history().val_loss.last().unwrap();
    assert!((mse - last_val).abs() < 1e-6);
}

#[test]
fn test_denormalized_predictions_use_scaler() {
    let device = <TrainBackend as Backend>::Device::default();
    let raw: Vec<f64> = (0..40).map(|i| 100.0 + 5.0 * i as f64).collect();
    let scaler = MinMaxScaler::fit(&raw).unwrap();
    let windows = build_windows(&scaler.transform_all(&raw), 5);
    let (train, test) = split_ordered(&windows, 0.8);

    let trained = train_forecaster::<TrainBackend>(
        CellKind::SimpleRnn,
        &train,
        &test,
        &quick_config(1, 0.001),
        &device,
    )
    .unwrap();

    let normalized = trained.predict(&test, &device).unwrap();
    let watts = trained.predict_denormalized(&test, &scaler, &device).unwrap();
    for (n, w) in normalized.iter().zip(&watts) {
        assert!((scaler.inverse_transform(*n as f64) - w).abs() < 1e-9);
    }
}

#[test]
fn test_training_without_samples_fails() {
    let device = <TrainBackend as Backend>::Device::default();
    let empty = build_windows(&[0.1, 0.2], 5);
    let result = train_forecaster::<TrainBackend>(
        CellKind::SimpleRnn,
        &empty,
        &empty,
        &quick_config(1, 0.001),
        &device,
    );
    assert!(result.is_err());
}
