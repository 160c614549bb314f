// Internal modules
use crate::error::{ForecastError, Result};

/// Min-max scaler over a single column.
///
/// Fitted once on the raw series and then reused both to normalize the
/// training input and to map predictions back to watts. Mirrors the usual
/// min-max convention for a constant column: the scale falls back to 1, so
/// every value normalizes to 0 and inverts back to the constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the scaler to the observed minimum and maximum of `values`
    ///
    /// # Returns
    ///
    /// `ForecastError::Numeric` if `values` is empty or holds a non-finite value
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::Numeric(
                "cannot fit a scaler on an empty series".to_string(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Numeric(
                "cannot fit a scaler on non-finite values".to_string(),
            ));
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Observed `max - min` of the fitted series (zero for a constant series)
    pub fn data_range(&self) -> f64 {
        self.max - self.min
    }

    fn scale(&self) -> f64 {
        let range = self.data_range();
        if range.abs() < f64::EPSILON {
            1.0
        } else {
            range
        }
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.min) / self.scale()
    }

    pub fn inverse_transform(&self, y: f64) -> f64 {
        y * self.scale() + self.min
    }

    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform(v)).collect()
    }

    pub fn inverse_transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.inverse_transform(v)).collect()
    }
}
