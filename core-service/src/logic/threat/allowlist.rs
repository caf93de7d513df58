//! Domain Allowlist
//!
//! Well-known domains that bypass the classifiers entirely. Matching is on
//! the exact host after lower-casing and dropping one leading `www.`;
//! subdomains of a listed domain are not covered.

use std::collections::HashSet;

use crate::logic::features::{normalize, ParsedUrl};

pub const SAFE_DOMAINS: [&str; 16] = [
    "google.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "github.com",
    "stackoverflow.com",
    "amazon.com",
    "apple.com",
    "microsoft.com",
    "wikipedia.org",
    "reddit.com",
    "netflix.com",
    "spotify.com",
    "anthropic.com",
];

#[derive(Debug, Clone)]
pub struct Allowlist {
    domains: HashSet<String>,
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::new(SAFE_DOMAINS)
    }
}

impl Allowlist {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn contains_domain(&self, domain: &str) -> bool {
        self.domains.contains(&domain.to_lowercase())
    }

    /// Host of `url` is on the list. Unparseable URLs are never allowlisted.
    pub fn is_allowlisted(&self, url: &str) -> bool {
        let url = normalize(url);
        let parsed = ParsedUrl::parse(&url);
        if parsed.is_degraded() {
            return false;
        }

        let host = parsed.netloc.to_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        self.domains.contains(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let allowlist = Allowlist::default();
        assert_eq!(allowlist.len(), 16);
        assert!(allowlist.contains_domain("GitHub.com"));
    }

    #[test]
    fn test_bare_and_www_hosts() {
        let allowlist = Allowlist::default();
        assert!(allowlist.is_allowlisted("google.com"));
        assert!(allowlist.is_allowlisted("https://www.google.com/search?q=rust"));
        assert!(allowlist.is_allowlisted("https://WWW.GitHub.com/rust-lang"));
        assert!(allowlist.is_allowlisted("www.wikipedia.org/wiki/Phishing"));
    }

    #[test]
    fn test_lookalikes_not_allowlisted() {
        let allowlist = Allowlist::default();
        assert!(!allowlist.is_allowlisted("https://mail.google.com"));
        assert!(!allowlist.is_allowlisted("https://google.com.evil.xyz/login"));
        assert!(!allowlist.is_allowlisted("https://www.www.google.com"));
        assert!(!allowlist.is_allowlisted("https://google.com:8443/"));
        assert!(!allowlist.is_allowlisted("paypal-login-verify.com"));
    }

    #[test]
    fn test_degraded_parse_is_not_allowlisted() {
        let allowlist = Allowlist::new(["google.com", "[google.com"]);
        assert!(!allowlist.is_allowlisted("http://[google.com/"));
    }

    #[test]
    fn test_empty_input() {
        assert!(!Allowlist::default().is_allowlisted(""));
    }
}
