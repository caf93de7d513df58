//! Stats Module - Offline Evaluation Registry
//!
//! Written once by training, then read-only for the process lifetime.

pub mod metrics;

pub use metrics::{round4, BinaryMetrics, ConfusionMatrix, TrainingStats};

use once_cell::sync::OnceCell;

use crate::error::{ClassifierError, ClassifierResult};

#[derive(Debug, Default)]
pub struct StatsRegistry {
    stats: OnceCell<TrainingStats>,
}

impl StatsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record evaluation results. Only the first call succeeds.
    pub fn record(&self, stats: TrainingStats) -> ClassifierResult<()> {
        self.stats
            .set(stats)
            .map_err(|_| ClassifierError::AlreadyRecorded)
    }

    pub fn get(&self) -> ClassifierResult<&TrainingStats> {
        self.stats.get().ok_or(ClassifierError::NotReady)
    }

    pub fn is_recorded(&self) -> bool {
        self.stats.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats(training_samples: usize) -> TrainingStats {
        TrainingStats::new(BinaryMetrics::default(), BinaryMetrics::default(), training_samples, 10)
    }

    #[test]
    fn test_get_before_record_is_not_ready() {
        let registry = StatsRegistry::new();
        assert!(matches!(registry.get(), Err(ClassifierError::NotReady)));
        assert!(!registry.is_recorded());
    }

    #[test]
    fn test_record_once() {
        let registry = StatsRegistry::new();
        registry.record(sample_stats(40)).unwrap();

        assert!(matches!(
            registry.record(sample_stats(99)),
            Err(ClassifierError::AlreadyRecorded)
        ));
        assert_eq!(registry.get().unwrap().training_samples, 40);
    }
}
