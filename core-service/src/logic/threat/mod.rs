//! Threat Module - URL Verdicts
//!
//! ## Structure
//! - `types`: verdict records (Verdict, ClassifierVerdict, FinalVerdict)
//! - `rules`: fixed thresholds and constants
//! - `allowlist`: domains that bypass the models
//! - `engine`: the decision engine and its trained state
//!
//! ## Usage
//! ```ignore
//! let engine = DecisionEngine::new();
//! engine.install(models, stats)?;
//!
//! let verdict = engine.predict("http://paypal-login-verify.com")?;
//! match verdict.verdict {
//!     Verdict::Safe => println!("ok"),
//!     Verdict::Malicious => println!("reject: {:?}", verdict.reasons),
//! }
//! ```

pub mod allowlist;
pub mod engine;
pub mod rules;
pub mod types;

pub use allowlist::{Allowlist, SAFE_DOMAINS};
pub use engine::{DecisionEngine, TrainedModels};
pub use rules::{ALLOWLIST_CONFIDENCE, DECISION_THRESHOLD, EVALUATION_THRESHOLD};
pub use types::{ClassifierVerdict, EngineStatus, FinalVerdict, Verdict, VerdictSource};
