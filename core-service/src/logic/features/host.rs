//! Host / Structure Feature Extraction
//!
//! Signals taken from the parsed network location and path. A degraded parse
//! has empty components, so these all fall back to zero.

use super::url::ParsedUrl;
use super::vector::{flag, FeatureExtractor, FeatureVector};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostFeatures {
    pub has_ip_address: bool,
    pub has_https: bool,
    pub domain_length: usize,
    pub path_length: usize,
    pub num_subdomains: usize,
}

impl HostFeatures {
    pub fn from_parsed(url_lower: &str, parsed: &ParsedUrl) -> Self {
        Self {
            has_ip_address: parsed.has_ipv4_host(),
            has_https: url_lower.starts_with("https"),
            domain_length: parsed.netloc.chars().count(),
            path_length: parsed.path.chars().count(),
            num_subdomains: parsed.subdomain_count(),
        }
    }
}

impl FeatureExtractor for HostFeatures {
    fn extract(&self, vector: &mut FeatureVector) {
        vector.set_by_name("has_ip_address", flag(self.has_ip_address));
        vector.set_by_name("has_https", flag(self.has_https));
        vector.set_by_name("domain_length", self.domain_length as f32);
        vector.set_by_name("path_length", self.path_length as f32);
        vector.set_by_name("num_subdomains", self.num_subdomains as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_features() {
        let url = "https://a.b.example.com/login/index.html";
        let host = HostFeatures::from_parsed(url, &ParsedUrl::parse(url));

        assert!(!host.has_ip_address);
        assert!(host.has_https);
        assert_eq!(host.domain_length, 15);
        assert_eq!(host.path_length, 17);
        assert_eq!(host.num_subdomains, 2);
    }

    #[test]
    fn test_degraded_parse_zeroes_host_features() {
        let url = "http://[1.2.3.4/x";
        let parsed = ParsedUrl::parse(url);
        let host = HostFeatures::from_parsed(url, &parsed);

        assert!(parsed.is_degraded());
        assert!(!host.has_ip_address);
        assert_eq!(host.domain_length, 0);
        assert_eq!(host.path_length, 0);
        assert_eq!(host.num_subdomains, 0);
    }
}
