//! Lexical Feature Extraction
//!
//! Phishing vocabulary and high-risk TLDs. Both lists are static
//! configuration; order matters for the explainer, which reports the first
//! matches in list order.

use super::vector::{flag, FeatureExtractor, FeatureVector};

/// Substrings commonly found in phishing URLs
pub const SUSPICIOUS_WORDS: &[&str] = &[
    "login", "verify", "account", "update", "secure", "banking",
    "confirm", "password", "credit", "signin", "ebayisapi", "webscr",
    "paypal", "submit", "redirect", "dispatch", "cmd", "checkout",
];

/// Top-level domains with a high share of phishing registrations
pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".xyz", ".top", ".click", ".link", ".work", ".party",
    ".gq", ".ml", ".cf", ".ga", ".tk", ".pw",
];

/// Vocabulary words present in the lower-cased URL, in vocabulary order
pub fn suspicious_words_in(url_lower: &str) -> Vec<&'static str> {
    SUSPICIOUS_WORDS
        .iter()
        .copied()
        .filter(|word| url_lower.contains(word))
        .collect()
}

/// URL ends with a risky TLD or has one right before a path separator
pub fn has_suspicious_tld(url_lower: &str) -> bool {
    SUSPICIOUS_TLDS.iter().any(|tld| {
        url_lower.ends_with(tld) || url_lower.contains(&format!("{}/", tld))
    })
}

/// Lexical signals over the lower-cased URL
#[derive(Debug, Clone, Default)]
pub struct LexicalFeatures {
    pub has_suspicious_words: bool,
    pub tld_suspicious: bool,
}

impl LexicalFeatures {
    pub fn from_lower(url_lower: &str) -> Self {
        Self {
            has_suspicious_words: SUSPICIOUS_WORDS.iter().any(|w| url_lower.contains(w)),
            tld_suspicious: has_suspicious_tld(url_lower),
        }
    }
}

impl FeatureExtractor for LexicalFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("has_suspicious_words", flag(self.has_suspicious_words));
        vector.set_by_name("tld_suspicious", flag(self.tld_suspicious));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(SUSPICIOUS_WORDS.len(), 18);
        assert_eq!(SUSPICIOUS_TLDS.len(), 12);
    }

    #[test]
    fn test_words_in_vocabulary_order() {
        let words = suspicious_words_in("http://paypal-login-verify.com");
        assert_eq!(words, vec!["login", "verify", "paypal"]);
    }

    #[test]
    fn test_suspicious_tld() {
        assert!(has_suspicious_tld("http://free-prize.xyz"));
        assert!(has_suspicious_tld("http://free-prize.tk/claim"));
        assert!(!has_suspicious_tld("http://example.com/page.xyzabc"));
        assert!(!has_suspicious_tld("http://example.com"));
    }

    #[test]
    fn test_lexical_features() {
        let lexical = LexicalFeatures::from_lower("http://secure-bank.ml/");
        assert!(lexical.has_suspicious_words);
        assert!(lexical.tld_suspicious);

        let mut vector = FeatureVector::new();
        lexical.extract(&mut vector);
        assert_eq!(vector.values[10], 1.0); // has_suspicious_words
        assert_eq!(vector.values[12], 1.0); // tld_suspicious
    }
}
