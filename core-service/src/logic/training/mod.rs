//! Training Module - One-Shot Model Fitting
//!
//! Sample, extract, split, fit both classifiers, evaluate on the held-out
//! rows, then install everything into the decision engine in one step.
//! Runs once per process; the engine refuses a second install.

pub mod split;

pub use split::{sample_indices, stratified_split, Split};

use std::path::Path;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::constants::{
    get_sample_size, get_seed, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED, DEFAULT_TEST_FRACTION,
    PROGRESS_EVERY,
};
use crate::error::{ClassifierError, ClassifierResult};
use crate::logic::dataset::{load_csv, LabeledUrl};
use crate::logic::features::{extract_features, FEATURE_COUNT};
use crate::logic::model::{
    Estimator, ForestConfig, NetworkConfig, NeuralNetwork, ProbabilityModel, RandomForest,
    StandardScaler,
};
use crate::logic::stats::{BinaryMetrics, TrainingStats};
use crate::logic::threat::{DecisionEngine, TrainedModels, EVALUATION_THRESHOLD};

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub sample_size: usize,
    pub test_fraction: f64,
    /// Seeds sampling and splitting; classifiers carry their own seeds
    pub seed: u64,
    pub progress_every: usize,
    pub forest: ForestConfig,
    pub network: NetworkConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            progress_every: PROGRESS_EVERY,
            forest: ForestConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Defaults with `TRAINING_SAMPLE_SIZE` / `TRAINING_SEED` applied
    pub fn from_env() -> Self {
        let seed = get_seed();
        Self {
            sample_size: get_sample_size(),
            seed,
            forest: ForestConfig { seed, ..Default::default() },
            network: NetworkConfig { seed, ..Default::default() },
            ..Default::default()
        }
    }
}

/// Load the CSV at `path` and train `engine` on it
pub fn train_from_csv(
    engine: &DecisionEngine,
    path: impl AsRef<Path>,
    config: &TrainingConfig,
) -> ClassifierResult<TrainingStats> {
    let records = load_csv(path)?;
    train(engine, &records, config)
}

pub fn train(
    engine: &DecisionEngine,
    records: &[LabeledUrl],
    config: &TrainingConfig,
) -> ClassifierResult<TrainingStats> {
    if engine.is_trained() {
        return Err(ClassifierError::AlreadyTrained);
    }
    if records.is_empty() {
        return Err(ClassifierError::Dataset("no labeled URLs to train on".to_string()));
    }

    let sampled = sample_indices(records.len(), config.sample_size, config.seed);
    log::info!("Extracting features from {} of {} URLs", sampled.len(), records.len());

    let mut features = Array2::<f32>::zeros((sampled.len(), FEATURE_COUNT));
    let mut labels = Vec::with_capacity(sampled.len());
    for (row, &index) in sampled.iter().enumerate() {
        if row > 0 && config.progress_every > 0 && row % config.progress_every == 0 {
            log::info!("Processed {}/{} URLs", row, sampled.len());
        }
        let record = &records[index];
        let vector = extract_features(&record.url);
        features.row_mut(row).assign(&ArrayView1::from(vector.as_slice()));
        labels.push(record.malicious);
    }

    let split = stratified_split(&labels, config.test_fraction, config.seed);
    let x_train = features.select(Axis(0), &split.train);
    let x_test = features.select(Axis(0), &split.test);
    let y_train: Vec<bool> = split.train.iter().map(|&i| labels[i]).collect();
    let y_test: Vec<bool> = split.test.iter().map(|&i| labels[i]).collect();
    log::info!("Split: {} train / {} test rows", y_train.len(), y_test.len());

    log::info!("Training random forest...");
    let forest = RandomForest::new(config.forest.clone()).fit(x_train.view(), &y_train)?;
    let forest_metrics = evaluate(&forest, x_test.view(), &y_test);
    log::info!("Random forest accuracy: {:.2}%", forest_metrics.accuracy * 100.0);

    let scaler = StandardScaler::fit(x_train.view())?;
    let x_train_scaled = scaler.transform(x_train.view())?;
    let x_test_scaled = scaler.transform(x_test.view())?;

    log::info!("Training neural network...");
    let network = NeuralNetwork::new(config.network.clone()).fit(x_train_scaled.view(), &y_train)?;
    let neural_metrics = evaluate(&network, x_test_scaled.view(), &y_test);
    log::info!(
        "Neural network accuracy: {:.2}% ({} epochs)",
        neural_metrics.accuracy * 100.0,
        network.epochs_trained()
    );

    let stats = TrainingStats::new(forest_metrics, neural_metrics, y_train.len(), y_test.len());
    engine.install(TrainedModels::new(forest, network, scaler), stats.clone())?;

    log::info!("Model comparison:\n{}", stats.comparison_table());
    Ok(stats)
}

/// Score held-out rows at the evaluation threshold
fn evaluate(model: &dyn ProbabilityModel, features: ArrayView2<'_, f32>, labels: &[bool]) -> BinaryMetrics {
    let predicted: Vec<bool> = features
        .rows()
        .into_iter()
        .map(|row| {
            let probability = match row.as_slice() {
                Some(values) => model.predict_probability(values),
                None => model.predict_probability(&row.to_vec()),
            };
            probability >= EVALUATION_THRESHOLD
        })
        .collect();
    BinaryMetrics::evaluate(&predicted, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(pairs: usize) -> Vec<LabeledUrl> {
        let mut records = Vec::with_capacity(pairs * 2);
        for i in 0..pairs {
            records.push(LabeledUrl::new(
                format!("http://192.168.{}.{}/paypal/login.php?cmd=verify&id={}", i % 7, i % 250, i),
                "bad",
            ));
            records.push(LabeledUrl::new(format!("https://www.site{}.com/about", i), "good"));
        }
        records
    }

    fn quick_config() -> TrainingConfig {
        TrainingConfig {
            forest: ForestConfig {
                n_estimators: 10,
                ..Default::default()
            },
            network: NetworkConfig {
                hidden_layers: vec![(16, 0.0), (8, 0.0)],
                learning_rate: 0.01,
                batch_size: 16,
                epochs: 20,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_train_installs_models() {
        let engine = DecisionEngine::new();
        let stats = train(&engine, &corpus(100), &quick_config()).unwrap();

        assert!(engine.is_trained());
        assert_eq!(stats.training_samples, 160);
        assert_eq!(stats.test_samples, 40);
        assert!(stats.rf_accuracy > 0.9, "rf accuracy {}", stats.rf_accuracy);
        assert!(stats.nn_accuracy > 0.8, "nn accuracy {}", stats.nn_accuracy);
        assert_eq!(engine.stats().unwrap(), &stats);

        let phish = engine.predict("http://10.0.0.1/paypal/login.php?cmd=verify").unwrap();
        assert!(phish.is_malicious);
        let benign = engine.predict("https://www.site9999.com/about").unwrap();
        assert!(!benign.is_malicious);
    }

    #[test]
    fn test_sample_size_caps_rows() {
        let engine = DecisionEngine::new();
        let config = TrainingConfig {
            sample_size: 50,
            ..quick_config()
        };
        let stats = train(&engine, &corpus(100), &config).unwrap();
        assert_eq!(stats.training_samples + stats.test_samples, 50);
    }

    #[test]
    fn test_train_twice_rejected() {
        let engine = DecisionEngine::new();
        train(&engine, &corpus(20), &quick_config()).unwrap();

        let again = train(&engine, &corpus(20), &quick_config());
        assert!(matches!(again, Err(ClassifierError::AlreadyTrained)));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let engine = DecisionEngine::new();
        assert!(matches!(
            train(&engine, &[], &quick_config()),
            Err(ClassifierError::Dataset(_))
        ));
        assert!(!engine.is_trained());
    }
}
