use serde::{Deserialize, Serialize};

/// Point-forecast accuracy of one prediction series against the actuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
}

impl ForecastAccuracy {
    /// Compares paired values; extra elements of the longer slice are ignored.
    /// Returns `None` when there is nothing to compare.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        let n = actual.len().min(predicted.len());
        if n == 0 {
            return None;
        }

        let (sq_sum, abs_sum) = actual
            .iter()
            .zip(predicted)
            .fold((0.0, 0.0), |(sq, abs), (a, p)| {
                let diff = p - a;
                (sq + diff * diff, abs + diff.abs())
            });

        let mse = sq_sum / n as f64;
        Some(Self {
            mse,
            rmse: mse.sqrt(),
            mae: abs_sum / n as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_forecast_has_zero_error() {
        let values = [1.0, 2.0, 3.0];
        let acc = ForecastAccuracy::compute(&values, &values).unwrap();
        assert_eq!(acc.mse, 0.0);
        assert_eq!(acc.mae, 0.0);
    }

    #[test]
    fn known_errors() {
        let acc = ForecastAccuracy::compute(&[0.0, 0.0], &[3.0, -1.0]).unwrap();
        assert!((acc.mse - 5.0).abs() < 1e-12);
        assert!((acc.rmse - 5.0f64.sqrt()).abs() < 1e-12);
        assert!((acc.mae - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_has_no_accuracy() {
        assert!(ForecastAccuracy::compute(&[], &[1.0]).is_none());
    }
}
