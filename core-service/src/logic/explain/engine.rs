//! Trigger Explainer
//!
//! Human-readable reasons for a URL. These rules have their own, coarser
//! thresholds: they answer "is this worth a look", not "what did the model
//! see", and are not derived from the feature vector.

use super::types::{Trigger, MAX_REPORTED_WORDS, NO_TRIGGERS};
use crate::logic::features::lexicon::{has_suspicious_tld, suspicious_words_in};
use crate::logic::features::url::{normalize, ParsedUrl};

pub const LONG_URL_CHARS: usize = 100;
pub const MANY_DOTS: usize = 4;
pub const MANY_HYPHENS: usize = 3;

/// Rules that fired, in check order
pub fn explain(url: &str) -> Vec<Trigger> {
    let url = normalize(url);
    let url_lower = url.to_lowercase();
    let parsed = ParsedUrl::parse(&url);

    let mut triggers = Vec::new();

    let length = url.chars().count();
    if length > LONG_URL_CHARS {
        triggers.push(Trigger::VeryLongUrl(length));
    }

    let dots = url.matches('.').count();
    if dots > MANY_DOTS {
        triggers.push(Trigger::ManyDots(dots));
    }

    let hyphens = url.matches('-').count();
    if hyphens > MANY_HYPHENS {
        triggers.push(Trigger::ManyHyphens(hyphens));
    }

    if url.contains('@') {
        triggers.push(Trigger::AtSymbol);
    }

    if parsed.has_ipv4_host() {
        triggers.push(Trigger::IpAddress);
    }

    if !url_lower.starts_with("https") {
        triggers.push(Trigger::NoHttps);
    }

    let words = suspicious_words_in(&url_lower);
    if !words.is_empty() {
        triggers.push(Trigger::SuspiciousWords(
            words.into_iter().take(MAX_REPORTED_WORDS).map(String::from).collect(),
        ));
    }

    if has_suspicious_tld(&url_lower) {
        triggers.push(Trigger::HighRiskTld);
    }

    triggers
}

/// Reasons as display strings; never empty
pub fn get_triggered_features(url: &str) -> Vec<String> {
    let triggers = explain(url);
    if triggers.is_empty() {
        return vec![NO_TRIGGERS.to_string()];
    }
    triggers.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phishing_url_reasons_in_rule_order() {
        let reasons = get_triggered_features("http://192.168.1.1/paypal/login.php?cmd=verify&x=1");
        assert_eq!(
            reasons,
            vec![
                "IP address instead of domain",
                "No HTTPS",
                "Suspicious words: login, verify, paypal",
            ]
        );
    }

    #[test]
    fn test_first_three_words_only() {
        let triggers = explain("https://secure-login-verify-account-paypal.com");
        let words = triggers
            .iter()
            .find_map(|t| match t {
                Trigger::SuspiciousWords(words) => Some(words.clone()),
                _ => None,
            })
            .expect("suspicious words reported");

        assert_eq!(words, vec!["login", "verify", "account"]);
    }

    #[test]
    fn test_paypal_is_listed() {
        let reasons = get_triggered_features("paypal-login-verify.com");
        assert!(reasons.iter().any(|r| r.starts_with("Suspicious words:") && r.contains("paypal")));
    }

    #[test]
    fn test_sentinel_when_nothing_fires() {
        assert_eq!(get_triggered_features("https://example.com"), vec![NO_TRIGGERS]);
    }

    #[test]
    fn test_thresholds_are_independent_of_raw_counts() {
        // Four dots and three hyphens are counted by the extractor but stay quiet here
        let reasons = get_triggered_features("https://a.b.c.d.com/w-x-y-z");
        assert!(!reasons.iter().any(|r| r.starts_with("Many dots")));
        assert!(!reasons.iter().any(|r| r.starts_with("Many hyphens")));

        let reasons = get_triggered_features("https://a.b.c.d.e.com/v-w-x-y-z");
        assert!(reasons.contains(&"Many dots (5)".to_string()));
        assert!(reasons.contains(&"Many hyphens (4)".to_string()));
    }

    #[test]
    fn test_long_url_and_tld() {
        let url = format!("https://prize.tk/{}", "a".repeat(90));
        let reasons = get_triggered_features(&url);
        assert_eq!(reasons, vec!["Very long URL (107 chars)", "High-risk TLD"]);
    }

    #[test]
    fn test_at_symbol() {
        let reasons = get_triggered_features("https://google.com@evil.com");
        assert_eq!(reasons, vec!["Contains @ symbol"]);
    }

    #[test]
    fn test_total_over_odd_inputs() {
        for url in ["", "://", "http://[", "\u{0}", "🦀🦀🦀"] {
            assert!(!get_triggered_features(url).is_empty());
        }
    }
}
