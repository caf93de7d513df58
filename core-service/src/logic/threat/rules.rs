//! Decision Rules & Thresholds
//!
//! Constants only. The agreement logic lives in `engine.rs`.

// ============================================================================
// THRESHOLDS
// ============================================================================

/// A classifier votes malicious at or above this probability
pub const DECISION_THRESHOLD: f32 = 0.7;

/// Threshold used when scoring held-out rows during training
pub const EVALUATION_THRESHOLD: f32 = 0.5;

/// Confidence reported for both classifiers on allowlisted URLs.
/// Not a model output; `VerdictSource::Allowlist` marks these verdicts.
pub const ALLOWLIST_CONFIDENCE: f64 = 0.01;
