use serde::{Deserialize, Serialize};

/// Label value (after trim + lower-case) that marks a malicious URL
pub const MALICIOUS_LABEL: &str = "bad";

/// One training row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LabeledUrl {
    pub url: String,
    pub malicious: bool,
}

impl LabeledUrl {
    pub fn new(url: impl Into<String>, label: &str) -> Self {
        Self {
            url: url.into(),
            malicious: is_malicious_label(label),
        }
    }
}

/// `bad` in any case or padding is malicious; every other label is safe
pub fn is_malicious_label(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(MALICIOUS_LABEL)
}

/// Counts reported after loading
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total: usize,
    pub malicious: usize,
    pub safe: usize,
    /// Rows dropped for an empty URL
    pub skipped: usize,
}

impl DatasetSummary {
    pub fn of(records: &[LabeledUrl], skipped: usize) -> Self {
        let malicious = records.iter().filter(|r| r.malicious).count();
        Self {
            total: records.len(),
            malicious,
            safe: records.len() - malicious,
            skipped,
        }
    }
}
