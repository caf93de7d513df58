//! Explain Module - Triggered Feature Reasons
//!
//! Operator-facing justification attached to every verdict, whichever branch
//! (allowlist or models) produced it.

pub mod engine;
pub mod types;

pub use engine::{explain, get_triggered_features};
pub use types::{Trigger, NO_TRIGGERS};
