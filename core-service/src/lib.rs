//! SmartURL ML - Core
//!
//! URL phishing classification: a 13-feature extractor, a triggered-feature
//! explainer, a random forest and a neural network that must agree, and a
//! domain allowlist that bypasses both.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{ClassifierError, ClassifierResult};
pub use logic::explain::get_triggered_features;
pub use logic::features::{extract_features, FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
pub use logic::stats::TrainingStats;
pub use logic::threat::{
    ClassifierVerdict, DecisionEngine, EngineStatus, FinalVerdict, TrainedModels, Verdict,
    VerdictSource,
};
pub use logic::training::{train, train_from_csv, TrainingConfig};
