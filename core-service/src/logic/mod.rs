//! Logic Module - Classification Pipeline
//!
//! Leaf-first:
//! - `features/` - URL parsing and the 13-slot feature vector
//! - `explain/` - human-readable trigger reasons
//! - `model/` - random forest, neural network, scaler
//! - `threat/` - allowlist and the decision engine
//! - `stats/` - evaluation metrics
//! - `dataset/` - labeled URL corpus
//! - `training/` - one-shot fitting into the engine

pub mod dataset;
pub mod explain;
pub mod features;
pub mod model;
pub mod stats;
pub mod threat;
pub mod training;
