use std::fs;
use std::path::{Path, PathBuf};
use chrono::Local;
use serde::{Serialize, Deserialize};
use std::io::Write;
use anyhow::Result;

use crate::config::TrainingConfig;
use crate::constants::EXPERIMENT_FILE_SUFFIX;
use crate::util::metrics::ForecastAccuracy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelExperiment {
    pub timestamp: String,
    pub crate_version: String,
    pub model_type: String,
    pub hidden_size: usize,
    pub window_length: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub train_samples: usize,
    pub test_samples: usize,
    pub final_val_loss: Option<f64>,
    pub best_val_loss: Option<f64>,
    pub test_rmse_watts: Option<f64>,
    pub test_mae_watts: Option<f64>,
    pub training_time_seconds: Option<f64>,
    pub notes: String,
}

impl ModelExperiment {
    pub fn new(
        model_type: &str,
        window_length: usize,
        training: &TrainingConfig,
        train_samples: usize,
        test_samples: usize,
    ) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            crate_version: crate::build_info::PKG_VERSION.to_string(),
            model_type: model_type.to_string(),
            hidden_size: training.hidden_size,
            window_length,
            epochs: training.epochs,
            batch_size: training.batch_size,
            learning_rate: training.learning_rate,
            train_samples,
            test_samples,
            final_val_loss: None,
            best_val_loss: None,
            test_rmse_watts: None,
            test_mae_watts: None,
            training_time_seconds: None,
            notes: "".to_string(),
        }
    }

    pub fn set_validation_losses(&mut self, val_loss: &[f64]) {
        self.final_val_loss = val_loss.last().copied();
        self.best_val_loss = val_loss
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::min);
    }

    pub fn set_test_accuracy(&mut self, accuracy: &ForecastAccuracy) {
        self.test_rmse_watts = Some(accuracy.rmse);
        self.test_mae_watts = Some(accuracy.mae);
    }

    pub fn set_training_time(&mut self, seconds: f64) {
        self.training_time_seconds = Some(seconds);
    }

    pub fn add_note(&mut self, note: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(note);
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}_h{}_w{}_e{}{}",
            self.model_type, self.hidden_size, self.window_length, self.epochs, EXPERIMENT_FILE_SUFFIX,
        )
    }

    pub fn save(&self, experiment_dir: &Path) -> Result<PathBuf> {
        // Create directory if it doesn't exist
        fs::create_dir_all(experiment_dir)?;

        let file_path = experiment_dir.join(self.file_name());

        let json = serde_json::to_string_pretty(&self)?;
        let mut file = fs::File::create(&file_path)?;
        file.write_all(json.as_bytes())?;

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_loss_skips_non_finite_epochs() {
        let mut exp = ModelExperiment::new("lstm", 30, &TrainingConfig::default(), 56, 14);
        exp.set_validation_losses(&[0.5, f64::NAN, 0.2, 0.3]);
        assert_eq!(exp.final_val_loss, Some(0.3));
        assert_eq!(exp.best_val_loss, Some(0.2));
    }

    #[test]
    fn saves_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut exp = ModelExperiment::new("simple_rnn", 30, &TrainingConfig::default(), 56, 14);
        exp.set_training_time(1.5);
        exp.add_note("first");
        exp.add_note("second");

        let path = exp.save(dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "simple_rnn_h64_w30_e20_experiment.json"
        );

        let loaded: ModelExperiment =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.notes, "first\nsecond");
        assert_eq!(loaded.training_time_seconds, Some(1.5));
    }
}
