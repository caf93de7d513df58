//! Central Configuration Constants
//!
//! Single source of truth for training defaults. Each default can be
//! overridden from the environment through the helpers below.

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/phishing_site_urls.csv";

/// Rows sampled from the dataset before feature extraction
pub const DEFAULT_SAMPLE_SIZE: usize = 50_000;

/// Fraction of sampled rows held out for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Seed for sampling, splitting and both classifiers
pub const DEFAULT_SEED: u64 = 42;

/// Feature extraction logs progress every this many URLs
pub const PROGRESS_EVERY: usize = 10_000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "SmartURL ML";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get dataset path from environment or use default
pub fn get_dataset_path() -> String {
    std::env::var("DATASET_PATH")
        .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}

/// Get training sample size from environment or use default
pub fn get_sample_size() -> usize {
    std::env::var("TRAINING_SAMPLE_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(DEFAULT_SAMPLE_SIZE)
}

/// Get training seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("TRAINING_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}
