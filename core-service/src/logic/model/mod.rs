//! Model Module - Classifiers
//!
//! Two independent estimators fitted on the same feature rows:
//! - `forest`: random forest on raw features
//! - `neural`: feed-forward network on standardized features
//!
//! Both produce immutable `ProbabilityModel`s that record the feature layout
//! they were fitted against.

pub mod classifier;
pub mod forest;
pub mod neural;
pub mod scaler;

pub use classifier::{Estimator, ModelLayout, ProbabilityModel};
pub use forest::{FittedForest, ForestConfig, RandomForest};
pub use neural::{FittedNetwork, NetworkConfig, NeuralNetwork};
pub use scaler::StandardScaler;
