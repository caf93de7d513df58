//! Configuration module

use std::env;

use smarturl_ml_core::constants::{
    get_dataset_path, get_sample_size, DEFAULT_DATASET_PATH, DEFAULT_SAMPLE_SIZE,
};

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8082,http://localhost:3000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Labeled URL CSV used for the one-shot training run
    pub dataset_path: String,

    /// Rows sampled from the dataset before training
    pub training_sample_size: usize,

    /// Allowed browser origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            training_sample_size: DEFAULT_SAMPLE_SIZE,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            dataset_path: get_dataset_path(),
            training_sample_size: get_sample_size(),

            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8083);
        assert_eq!(config.dataset_path, "data/phishing_site_urls.csv");
        assert_eq!(config.training_sample_size, 50_000);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:8082".to_string(), "http://localhost:3000".to_string()]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        assert_eq!(parse_origins(" https://a.dev , ,*"), vec!["https://a.dev", "*"]);
    }
}
