//! Standard Scaler
//!
//! Per-feature mean / standard deviation captured once on the training rows
//! and reused unchanged at inference. Zero-variance features keep scale 1.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{ClassifierError, ClassifierResult};

#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f32>,
    scale: Array1<f32>,
}

impl StandardScaler {
    pub fn fit(features: ArrayView2<'_, f32>) -> ClassifierResult<Self> {
        let mean = features
            .mean_axis(Axis(0))
            .ok_or_else(|| ClassifierError::Model("scaler: no rows to fit".to_string()))?;

        let scale = features
            .var_axis(Axis(0), 0.0)
            .mapv(|var| {
                let std = var.sqrt();
                if std > f32::EPSILON { std } else { 1.0 }
            });

        Ok(Self { mean, scale })
    }

    /// Pass-through scaler: mean 0, scale 1
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: Array1::zeros(n_features),
            scale: Array1::ones(n_features),
        }
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &Array1<f32> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f32> {
        &self.scale
    }

    /// Scale a single row. Extra trailing values are ignored.
    pub fn transform_row(&self, row: &[f32]) -> Vec<f32> {
        row.iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect()
    }

    pub fn transform(&self, features: ArrayView2<'_, f32>) -> ClassifierResult<Array2<f32>> {
        if features.ncols() != self.n_features() {
            return Err(ClassifierError::Model(format!(
                "scaler: fitted on {} features, got {}",
                self.n_features(),
                features.ncols()
            )));
        }
        Ok((&features - &self.mean) / &self.scale)
    }
}
