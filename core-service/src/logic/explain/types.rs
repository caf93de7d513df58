use std::fmt;

use serde::{Deserialize, Serialize};

/// Returned alone when no rule fires
pub const NO_TRIGGERS: &str = "No specific triggers — statistical pattern";

/// Maximum vocabulary words quoted in a `SuspiciousWords` reason
pub const MAX_REPORTED_WORDS: usize = 3;

/// One human-readable reason, in the order the rules are checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "detail", rename_all = "snake_case")]
pub enum Trigger {
    VeryLongUrl(usize),
    ManyDots(usize),
    ManyHyphens(usize),
    AtSymbol,
    IpAddress,
    NoHttps,
    SuspiciousWords(Vec<String>),
    HighRiskTld,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::VeryLongUrl(len) => write!(f, "Very long URL ({} chars)", len),
            Trigger::ManyDots(count) => write!(f, "Many dots ({})", count),
            Trigger::ManyHyphens(count) => write!(f, "Many hyphens ({})", count),
            Trigger::AtSymbol => write!(f, "Contains @ symbol"),
            Trigger::IpAddress => write!(f, "IP address instead of domain"),
            Trigger::NoHttps => write!(f, "No HTTPS"),
            Trigger::SuspiciousWords(words) => write!(f, "Suspicious words: {}", words.join(", ")),
            Trigger::HighRiskTld => write!(f, "High-risk TLD"),
        }
    }
}
