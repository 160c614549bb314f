use burn_ndarray::NdArray;
use burn::tensor::backend::Backend;

use crate::forecast::step_1_tensor_preparation::{
    build_windows, split_ordered, train_len, window_count, WindowedSamples,
};

type TestBackend = NdArray<f32>;

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn test_window_count_matches_series_length() {
    for n in [0usize, 1, 29, 30, 31, 45, 100] {
        let windows = build_windows(&ramp(n), 30);
        assert_eq!(windows.len(), n.saturating_sub(30), "series of {n}");
        assert_eq!(windows.len(), window_count(n, 30));
    }
}

#[test]
fn test_short_series_yields_empty_set() {
    let windows = build_windows(&ramp(30), 30);
    assert!(windows.is_empty());
    assert_eq!(windows.window_length(), 30);

    let windows = build_windows(&[], 30);
    assert!(windows.is_empty());
}

#[test]
fn test_histories_are_contiguous_and_ordered() {
    let series = ramp(40);
    let windows = build_windows(&series, 30);
    assert_eq!(windows.len(), 10);

    for i in 0..windows.len() {
        let history = windows.histories().row(i);
        assert_eq!(history.len(), 30);
        for (t, &v) in history.iter().enumerate() {
            assert_eq!(v, (i + t) as f32);
        }
        assert_eq!(windows.targets()[i], (i + 30) as f32);
        assert_eq!(windows.sample_index(i), i);
    }

    // Consecutive windows overlap by window_length - 1
    let first = windows.histories().row(0);
    let second = windows.histories().row(1);
    for t in 1..30 {
        assert_eq!(first[t], second[t - 1]);
    }
}

#[test]
fn test_ramp_of_100_splits_56_14() {
    let windows = build_windows(&ramp(100), 30);
    assert_eq!(windows.len(), 70);

    let (train, test) = split_ordered(&windows, 0.8);
    assert_eq!(train.len(), 56);
    assert_eq!(test.len(), 14);
    assert_eq!(train_len(70, 0.8), 56);
}

#[test]
fn test_split_preserves_time_order() {
    let windows = build_windows(&ramp(100), 30);
    let (train, test) = split_ordered(&windows, 0.8);

    let last_train = train.sample_index(train.len() - 1);
    for i in 0..test.len() {
        assert!(test.sample_index(i) > last_train);
    }
    assert_eq!(test.sample_index(0), 56);
    assert_eq!(test.targets()[0], 86.0);
    assert_eq!(test.targets()[test.len() - 1], 99.0);
}

#[test]
fn test_select_gathers_rows_in_order() {
    let windows = build_windows(&ramp(40), 5);
    let batch = windows.select(&[7, 2, 9]);

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.targets().to_vec(), vec![12.0, 7.0, 14.0]);
    assert_eq!(batch.histories().row(1).to_vec(), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_to_tensors_shapes_and_values() {
    let device = <TestBackend as Backend>::Device::default();
    let windows = build_windows(&ramp(12), 4);

    let (features, targets) = windows.to_tensors::<TestBackend>(&device);
    assert_eq!(features.dims(), [8, 4, 1]);
    assert_eq!(targets.dims(), [8, 1]);

    let feature_values = features.into_data().to_vec::<f32>().unwrap();
    assert_eq!(&feature_values[..4], &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(&feature_values[4..8], &[1.0, 2.0, 3.0, 4.0]);

    let target_values = targets.into_data().to_vec::<f32>().unwrap();
    assert_eq!(target_values[0], 4.0);
    assert_eq!(target_values[7], 11.0);
}

#[test]
fn test_empty_constructor() {
    let empty = WindowedSamples::empty(30);
    assert_eq!(empty.len(), 0);
    let (train, test) = split_ordered(&empty, 0.8);
    assert!(train.is_empty() && test.is_empty());
}
