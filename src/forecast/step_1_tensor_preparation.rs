// External crates
use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use log::debug;
use ndarray::{Array1, Array2, Axis};

/// Ordered (history, next value) pairs cut from a normalized series.
///
/// Row `i` holds the history that starts at series index `origin + i`; its
/// target sits at `origin + i + window_length`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedSamples {
    histories: Array2<f32>,
    targets: Array1<f32>,
    origin: usize,
}

impl WindowedSamples {
    /// An empty set for the given window length
    pub fn empty(window_length: usize) -> Self {
        Self {
            histories: Array2::zeros((0, window_length)),
            targets: Array1::zeros(0),
            origin: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn window_length(&self) -> usize {
        self.histories.ncols()
    }

    pub fn histories(&self) -> &Array2<f32> {
        &self.histories
    }

    pub fn targets(&self) -> &Array1<f32> {
        &self.targets
    }

    /// Series index at which the history of sample `i` starts
    pub fn sample_index(&self, i: usize) -> usize {
        self.origin + i
    }

    /// Gathers the given rows, in the given order, into a new set.
    ///
    /// The result keeps the origin of the first selected row, so it is only
    /// meaningful as a mini-batch, not as an ordered partition.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            histories: self.histories.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
            origin: indices.first().map_or(self.origin, |&i| self.origin + i),
        }
    }

    /// Converts the samples to Burn tensors
    ///
    /// # Returns
    ///
    /// `(features, targets)` with shapes `[samples, window_length, 1]` and `[samples, 1]`
    pub fn to_tensors<B: Backend>(&self, device: &B::Device) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let targets: Vec<f32> = self.targets.iter().copied().collect();

        let features = self.histories_tensor::<B>(device);
        let targets = Tensor::<B, 2>::from_data(TensorData::new(targets, [self.len(), 1]), device);

        debug!(
            "Tensors prepared: features {:?}, targets {:?}",
            features.dims(),
            targets.dims()
        );
        (features, targets)
    }

    /// Features tensor only, for inference
    pub fn histories_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let features: Vec<f32> = self.histories.iter().copied().collect();
        Tensor::<B, 3>::from_data(
            TensorData::new(features, [self.len(), self.window_length(), 1]),
            device,
        )
    }
}

/// Number of windows a series of `series_len` values yields
pub fn window_count(series_len: usize, window_length: usize) -> usize {
    series_len.saturating_sub(window_length)
}

/// Slides a stride-1 window over a normalized series
///
/// # Arguments
///
/// * `series` - Normalized values in time order
/// * `window_length` - Number of time steps in each history
///
/// # Returns
///
/// Exactly `max(0, N - window_length)` samples in time order. A series too
/// short to provide a history and a target yields an empty set.
pub fn build_windows(series: &[f64], window_length: usize) -> WindowedSamples {
    let n_samples = window_count(series.len(), window_length);
    if n_samples == 0 || window_length == 0 {
        return WindowedSamples::empty(window_length);
    }

    let histories = Array2::from_shape_fn((n_samples, window_length), |(i, t)| {
        series[i + t] as f32
    });
    let targets = Array1::from_shape_fn(n_samples, |i| series[i + window_length] as f32);

    WindowedSamples {
        histories,
        targets,
        origin: 0,
    }
}

/// Number of samples that go to the training prefix
pub fn train_len(n_samples: usize, train_fraction: f64) -> usize {
    ((n_samples as f64 * train_fraction) as usize).min(n_samples)
}

/// Splits samples into a training prefix and a test suffix without shuffling
///
/// # Arguments
///
/// * `samples` - Windowed samples in time order
/// * `train_fraction` - Share of samples for the prefix, truncated toward zero
///
/// # Returns
///
/// Returns a tuple of (train, test); every test sample is later in time
/// than every train sample
pub fn split_ordered(
    samples: &WindowedSamples,
    train_fraction: f64,
) -> (WindowedSamples, WindowedSamples) {
    let split_idx = train_len(samples.len(), train_fraction);

    let train = WindowedSamples {
        histories: samples.histories.slice(ndarray::s![..split_idx, ..]).to_owned(),
        targets: samples.targets.slice(ndarray::s![..split_idx]).to_owned(),
        origin: samples.origin,
    };
    let test = WindowedSamples {
        histories: samples.histories.slice(ndarray::s![split_idx.., ..]).to_owned(),
        targets: samples.targets.slice(ndarray::s![split_idx..]).to_owned(),
        origin: samples.origin + split_idx,
    };

    (train, test)
}
