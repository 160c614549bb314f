// External imports
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::{activation, backend::Backend, Tensor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurrence used by a [`RecurrentCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Elman recurrence: `h_t = tanh(W x_t + U h_(t-1) + b)`
    SimpleRnn,
    /// Long short-term memory with input, forget, cell and output gates
    Lstm,
}

impl CellKind {
    /// Both kinds, in the order the pipeline trains them
    pub const ALL: [CellKind; 2] = [CellKind::SimpleRnn, CellKind::Lstm];

    /// Position in [`CellKind::ALL`], stored by modules that record their kind
    pub fn index(self) -> usize {
        match self {
            CellKind::SimpleRnn => 0,
            CellKind::Lstm => 1,
        }
    }

    /// Number of stacked gate projections in the combined weight matrices
    pub fn gate_count(self) -> usize {
        match self {
            CellKind::SimpleRnn => 1,
            CellKind::Lstm => 4,
        }
    }

    /// Machine name, used in file names and JSON
    pub fn name(self) -> &'static str {
        match self {
            CellKind::SimpleRnn => "simple_rnn",
            CellKind::Lstm => "lstm",
        }
    }

    /// Short human label, used in logs, tables and chart legends
    pub fn label(self) -> &'static str {
        match self {
            CellKind::SimpleRnn => "RNN",
            CellKind::Lstm => "LSTM",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// # Recurrent Cell
///
/// A single unidirectional recurrent layer shared by both forecaster variants.
/// The input and hidden projections hold all gates of the chosen [`CellKind`]
/// side by side, so the simple cell has `[in, hidden]` matrices and the LSTM
/// `[in, 4 * hidden]`.
///
/// ## LSTM step
///
/// For input x_t and previous state (h_(t-1), c_(t-1)):
///
/// 1. i, f, g, o = split(W · x_t + U · h_(t-1))
/// 2. c_t = σ(f) ∘ c_(t-1) + σ(i) ∘ tanh(g)
/// 3. h_t = σ(o) ∘ tanh(c_t)
#[derive(Module, Debug)]
pub struct RecurrentCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    kind_index: usize,

    input_weights: Linear<B>,
    hidden_weights: Linear<B>,
}

impl<B: Backend> RecurrentCell<B> {
    /// Create a new recurrent cell
    ///
    /// # Arguments
    ///
    /// * `kind` - Recurrence to apply at every step
    /// * `input_size` - Number of features per time step
    /// * `hidden_size` - Width of the hidden state
    /// * `device` - The device to allocate tensors on
    pub fn new(kind: CellKind, input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let gate_size = kind.gate_count() * hidden_size;

        let input_weights = LinearConfig::new(input_size, gate_size).init(device);
        let hidden_weights = LinearConfig::new(hidden_size, gate_size).init(device);

        Self {
            input_size,
            hidden_size,
            kind_index: kind.index(),
            input_weights,
            hidden_weights,
        }
    }

    pub fn kind(&self) -> CellKind {
        CellKind::ALL[self.kind_index]
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Runs the recurrence over the whole sequence
    ///
    /// # Arguments
    ///
    /// * `x` - Input tensor of shape [batch_size, seq_len, input_size]
    ///
    /// # Returns
    ///
    /// The hidden state after the last time step, shape [batch_size, hidden_size]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let device = x.device();
        let [batch_size, seq_len, _] = x.dims();
        let kind = self.kind();

        let mut h = Tensor::zeros([batch_size, self.hidden_size], &device);
        let mut c = Tensor::zeros([batch_size, self.hidden_size], &device);

        for t in 0..seq_len {
            let x_t = x
                .clone()
                .narrow(1, t, 1)
                .reshape([batch_size, self.input_size]);

            let gates = self.input_weights.forward(x_t) + self.hidden_weights.forward(h.clone());

            match kind {
                CellKind::SimpleRnn => {
                    h = activation::tanh(gates);
                }
                CellKind::Lstm => {
                    let (h_next, c_next) = self.lstm_step(gates, c);
                    h = h_next;
                    c = c_next;
                }
            }
        }

        h
    }

    fn lstm_step(&self, gates: Tensor<B, 2>, c: Tensor<B, 2>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let hs = self.hidden_size;

        let i = activation::sigmoid(gates.clone().narrow(1, 0, hs));
        let f = activation::sigmoid(gates.clone().narrow(1, hs, hs));
        let g = activation::tanh(gates.clone().narrow(1, 2 * hs, hs));
        let o = activation::sigmoid(gates.narrow(1, 3 * hs, hs));

        let c = f * c + i * g;
        let h = o * activation::tanh(c.clone());
        (h, c)
    }
}
