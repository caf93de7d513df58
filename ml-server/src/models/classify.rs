use serde::{Deserialize, Serialize};
use smarturl_ml_core::{FinalVerdict, Verdict, VerdictSource};

/// Longest URL accepted by `/ml/classify`
pub const MAX_URL_LENGTH: usize = 8192;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub url: String,
    pub is_malicious: bool,

    // Random forest
    pub rf_prediction: bool,
    pub rf_confidence: f64,

    // Neural network
    pub nn_prediction: bool,
    pub nn_confidence: f64,

    /// Malicious only when both models agree
    pub final_verdict: Verdict,
    pub source: VerdictSource,
    pub triggered_features: Vec<String>,
}

impl From<FinalVerdict> for ClassifyResponse {
    fn from(verdict: FinalVerdict) -> Self {
        Self {
            url: verdict.url,
            is_malicious: verdict.is_malicious,
            rf_prediction: verdict.forest.is_malicious,
            rf_confidence: verdict.forest.confidence,
            nn_prediction: verdict.neural.is_malicious,
            nn_confidence: verdict.neural.confidence,
            final_verdict: verdict.verdict,
            source: verdict.source,
            triggered_features: verdict.reasons,
        }
    }
}
