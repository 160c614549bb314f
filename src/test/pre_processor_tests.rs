use crate::util::pre_processor::MinMaxScaler;

#[test]
fn test_fit_records_min_and_range() {
    let scaler = MinMaxScaler::fit(&[40.0, 10.0, 250.0, 90.0]).unwrap();
    assert_eq!(scaler.min(), 10.0);
    assert_eq!(scaler.max(), 250.0);
    assert_eq!(scaler.data_range(), 240.0);
}

#[test]
fn test_fitted_values_land_in_unit_interval() {
    let values = [3.0, -2.0, 7.5, 0.0, 12.0, 5.25];
    let scaler = MinMaxScaler::fit(&values).unwrap();
    let normalized = scaler.transform_all(&values);

    for v in &normalized {
        assert!((0.0..=1.0).contains(v), "{v} outside [0, 1]");
    }
    assert_eq!(scaler.transform(-2.0), 0.0);
    assert_eq!(scaler.transform(12.0), 1.0);
}

#[test]
fn test_inverse_of_transform_is_identity() {
    let values: Vec<f64> = (0..200).map(|i| (i as f64 * 0.37).sin() * 140.0 + 150.0).collect();
    let scaler = MinMaxScaler::fit(&values).unwrap();

    for &x in &values {
        let back = scaler.inverse_transform(scaler.transform(x));
        assert!((back - x).abs() < 1e-9, "{x} came back as {back}");
    }

    let restored = scaler.inverse_transform_all(&scaler.transform_all(&values));
    for (a, b) in values.iter().zip(&restored) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn test_constant_series_maps_to_zero() {
    let scaler = MinMaxScaler::fit(&[42.0, 42.0, 42.0]).unwrap();
    assert_eq!(scaler.data_range(), 0.0);
    assert_eq!(scaler.transform(42.0), 0.0);
    assert_eq!(scaler.inverse_transform(0.0), 42.0);
}

#[test]
fn test_fit_rejects_empty_and_non_finite() {
    assert!(MinMaxScaler::fit(&[]).is_err());
    assert!(MinMaxScaler::fit(&[1.0, f64::INFINITY]).is_err());
}
