//! Evaluation Metrics
//!
//! Binary classification metrics computed on the held-out rows. Divisions by
//! zero yield 0 rather than NaN.

use serde::{Deserialize, Serialize};

/// Round to 4 decimals for presentation.
///
/// Rounds the exact binary value, so `0.00035` (stored just below the
/// midpoint) becomes `0.0003`. Scaling by 10^4 first would round it up.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

// ============================================================================
// CONFUSION MATRIX
// ============================================================================

/// Counts with "malicious" as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Pairs beyond the shorter slice are ignored
    pub fn from_predictions(predicted: &[bool], actual: &[bool]) -> Self {
        let mut matrix = Self::default();
        for (&p, &a) in predicted.iter().zip(actual) {
            match (p, a) {
                (true, true) => matrix.true_positives += 1,
                (true, false) => matrix.false_positives += 1,
                (false, false) => matrix.true_negatives += 1,
                (false, true) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        ratio(
            2 * self.true_positives,
            2 * self.true_positives + self.false_positives + self.false_negatives,
        )
    }
}

// ============================================================================
// METRICS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl From<&ConfusionMatrix> for BinaryMetrics {
    fn from(matrix: &ConfusionMatrix) -> Self {
        Self {
            accuracy: round4(matrix.accuracy()),
            precision: round4(matrix.precision()),
            recall: round4(matrix.recall()),
            f1: round4(matrix.f1()),
        }
    }
}

impl BinaryMetrics {
    pub fn evaluate(predicted: &[bool], actual: &[bool]) -> Self {
        Self::from(&ConfusionMatrix::from_predictions(predicted, actual))
    }
}

/// Offline evaluation of both classifiers on the same test rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
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

impl TrainingStats {
    pub fn new(
        forest: BinaryMetrics,
        neural: BinaryMetrics,
        training_samples: usize,
        test_samples: usize,
    ) -> Self {
        Self {
            rf_accuracy: forest.accuracy,
            rf_precision: forest.precision,
            rf_recall: forest.recall,
            rf_f1: forest.f1,
            nn_accuracy: neural.accuracy,
            nn_precision: neural.precision,
            nn_recall: neural.recall,
            nn_f1: neural.f1,
            training_samples,
            test_samples,
        }
    }

    pub fn forest(&self) -> BinaryMetrics {
        BinaryMetrics {
            accuracy: self.rf_accuracy,
            precision: self.rf_precision,
            recall: self.rf_recall,
            f1: self.rf_f1,
        }
    }

    pub fn neural(&self) -> BinaryMetrics {
        BinaryMetrics {
            accuracy: self.nn_accuracy,
            precision: self.nn_precision,
            recall: self.nn_recall,
            f1: self.nn_f1,
        }
    }

    /// Side-by-side table for the training log
    pub fn comparison_table(&self) -> String {
        let forest = self.forest();
        let neural = self.neural();
        let rows = [
            ("Accuracy", forest.accuracy, neural.accuracy),
            ("Precision", forest.precision, neural.precision),
            ("Recall", forest.recall, neural.recall),
            ("F1 Score", forest.f1, neural.f1),
        ];

        let mut table = format!("{:<12}{:>16}{:>16}\n", "Metric", "Random Forest", "Neural Network");
        for (name, rf, nn) in rows {
            table.push_str(&format!("{:<12}{:>16.4}{:>16.4}\n", name, rf, nn));
        }
        table.push_str(&format!(
            "train={} test={}",
            self.training_samples, self.test_samples
        ));
        table
    }
}
