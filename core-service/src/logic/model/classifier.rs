//! Classifier Contracts
//!
//! Two seams: an `Estimator` fits on a feature matrix and returns a fitted
//! `ProbabilityModel`. Fitted models are immutable; probability queries take
//! `&self` and are safe to run from many request threads at once.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierResult;
use crate::logic::features::layout::{layout_hash, validate_layout, LayoutMismatchError, FEATURE_VERSION};

/// Feature layout a model was fitted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLayout {
    pub version: u8,
    pub hash: u32,
}

impl ModelLayout {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
        }
    }

    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.hash)
    }
}

impl Default for ModelLayout {
    fn default() -> Self {
        Self::current()
    }
}

/// A fitted classifier
pub trait ProbabilityModel: Send + Sync {
    /// Probability that the row is malicious, in [0, 1]
    fn predict_probability(&self, features: &[f32]) -> f32;

    fn layout(&self) -> ModelLayout;
}

/// Trainer for a `ProbabilityModel`
pub trait Estimator {
    type Model: ProbabilityModel + 'static;

    fn name(&self) -> &'static str;

    /// `labels[i]` is true when row `i` is malicious
    fn fit(&self, features: ArrayView2<'_, f32>, labels: &[bool]) -> ClassifierResult<Self::Model>;
}

/// Shared input checks for estimators
pub(crate) fn check_training_input(
    name: &str,
    features: &ArrayView2<'_, f32>,
    labels: &[bool],
) -> ClassifierResult<()> {
    use crate::error::ClassifierError;

    if features.nrows() == 0 {
        return Err(ClassifierError::Model(format!("{}: no training rows", name)));
    }
    if features.nrows() != labels.len() {
        return Err(ClassifierError::Model(format!(
            "{}: {} rows but {} labels",
            name,
            features.nrows(),
            labels.len()
        )));
    }
    Ok(())
}
