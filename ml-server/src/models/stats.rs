use serde::{Deserialize, Serialize};
use smarturl_ml_core::TrainingStats;

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatsResponse {
    pub rf_accuracy: f64,
    pub rf_precision: f64,
    pub rf_recall: f64,
    pub rf_f1: f64,
    pub nn_accuracy: f64,
    pub nn_precision: f64,
    pub nn_recall: f64,
    pub nn_f1: f64,
    pub training_samples: usize,
    pub test_samples: usize,
}

impl From<&TrainingStats> for ModelStatsResponse {
    fn from(stats: &TrainingStats) -> Self {
        Self {
            rf_accuracy: stats.rf_accuracy,
            rf_precision: stats.rf_precision,
            rf_recall: stats.rf_recall,
            rf_f1: stats.rf_f1,
            nn_accuracy: stats.nn_accuracy,
            nn_precision: stats.nn_precision,
            nn_recall: stats.nn_recall,
            nn_f1: stats.nn_f1,
            training_samples: stats.training_samples,
            test_samples: stats.test_samples,
        }
    }
}
