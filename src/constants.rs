// Input data
pub const POWER_COLUMN: &str = "POWER";

// Model parameters
pub const SEQUENCE_LENGTH: usize = 30; // Number of time steps to look back
pub const HIDDEN_SIZE: usize = 64;

// Data preprocessing
pub const TRAIN_SPLIT_RATIO: f64 = 0.8; // 80% of windows for training, the rest for validation

// Training
pub const EPOCHS: usize = 20;
pub const BATCH_SIZE: usize = 32;
pub const LEARNING_RATE: f64 = 0.001;
pub const SHUFFLE_SEED: u64 = 42;

// Panel projection
pub const PANEL_RATED_WATTS: f64 = 300.0;
pub const BUS_VOLTAGE: f64 = 12.0; // constant DC load voltage

// Placeholder environment waveforms (not modeled from power)
pub const TEMPERATURE_BASE_C: f64 = 25.0;
pub const TEMPERATURE_AMPLITUDE_C: f64 = 5.0;
pub const HUMIDITY_BASE_PCT: f64 = 60.0;
pub const HUMIDITY_AMPLITUDE_PCT: f64 = 10.0;
pub const WAVEFORM_SPAN: f64 = 10.0;

// Output
pub const OUTPUT_DIR: &str = "output";
pub const TABLE_PREVIEW_ROWS: usize = 10;
pub const PREDICTION_CHART_Y_MAX: f64 = 320.0;
pub const LOSS_CHART_FILE_NAME: &str = "validation_loss.svg";
pub const PREDICTION_CHART_FILE_NAME: &str = "prediction_comparison.svg";
pub const EXPERIMENT_FILE_SUFFIX: &str = "_experiment.json";
