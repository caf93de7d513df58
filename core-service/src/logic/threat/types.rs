//! Verdict Types
//!
//! Data structures only. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rules::ALLOWLIST_CONFIDENCE;
use crate::logic::features::LayoutInfo;
use crate::logic::stats::round4;

// ============================================================================
// VERDICT LABEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Safe,
    Malicious,
}

impl Verdict {
    pub fn from_malicious(is_malicious: bool) -> Self {
        if is_malicious {
            Verdict::Malicious
        } else {
            Verdict::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::Malicious => "MALICIOUS",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which branch of the engine produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    Allowlist,
    Models,
}

// ============================================================================
// CLASSIFIER VERDICT
// ============================================================================

/// One classifier's vote
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    pub is_malicious: bool,
    /// Probability of malicious, rounded to 4 decimals
    pub confidence: f64,
}

impl ClassifierVerdict {
    pub fn from_probability(probability: f32, threshold: f32) -> Self {
        Self {
            is_malicious: probability >= threshold,
            confidence: round4(probability as f64),
        }
    }

    pub fn allowlisted() -> Self {
        Self {
            is_malicious: false,
            confidence: ALLOWLIST_CONFIDENCE,
        }
    }
}

// ============================================================================
// FINAL VERDICT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalVerdict {
    pub url: String,
    pub is_malicious: bool,
    pub verdict: Verdict,
    pub forest: ClassifierVerdict,
    pub neural: ClassifierVerdict,
    pub source: VerdictSource,
    pub reasons: Vec<String>,
}

impl FinalVerdict {
    /// Malicious only when both classifiers agree
    pub fn from_votes(
        url: &str,
        forest: ClassifierVerdict,
        neural: ClassifierVerdict,
        source: VerdictSource,
        reasons: Vec<String>,
    ) -> Self {
        let is_malicious = forest.is_malicious && neural.is_malicious;
        Self {
            url: url.to_string(),
            is_malicious,
            verdict: Verdict::from_malicious(is_malicious),
            forest,
            neural,
            source,
            reasons,
        }
    }
}

// ============================================================================
// ENGINE STATUS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub trained: bool,
    pub trained_at: Option<DateTime<Utc>>,
    pub layout: LayoutInfo,
    pub allowlist_size: usize,
}
