//! Configuration management for the KolamKala API
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::analysis::{CannedAnalyzer, OpenAiAnalyzer, PatternAnalyzer};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// Application configuration
#[derive(Debug)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Credential for the vision model; the canned analysis is served without it
    pub openai_api_key: Option<SecretString>,

    /// Base URL of an OpenAI-compatible endpoint
    pub openai_base_url: String,

    /// Vision model name
    pub openai_model: String,

    /// Timeout for a single analysis call, in seconds
    pub analysis_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            api_host: var("API_HOST", "0.0.0.0"),

            api_port: var("API_PORT", "5000")
                .parse()
                .context("Invalid API_PORT")?,

            // An empty key counts as no key
            openai_api_key: lookup("OPENAI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),

            openai_base_url: var("OPENAI_BASE_URL", "https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),

            openai_model: var("OPENAI_MODEL", "gpt-4o"),

            analysis_timeout_secs: var("ANALYSIS_TIMEOUT_SECS", "60")
                .parse()
                .context("Invalid ANALYSIS_TIMEOUT_SECS")?,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.analysis_timeout_secs == 0 {
            anyhow::bail!("ANALYSIS_TIMEOUT_SECS must be greater than 0");
        }

        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "OPENAI_BASE_URL must be an http(s) URL, got {}",
                self.openai_base_url
            );
        }

        if self.openai_model.trim().is_empty() {
            anyhow::bail!("OPENAI_MODEL must not be empty");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Build the analyzer selected by the presence of a credential
    pub fn analyzer(&self) -> Result<Arc<dyn PatternAnalyzer>> {
        match &self.openai_api_key {
            Some(key) => {
                let analyzer = OpenAiAnalyzer::new(
                    &self.openai_base_url,
                    &self.openai_model,
                    SecretString::from(key.expose_secret().to_owned()),
                    Duration::from_secs(self.analysis_timeout_secs),
                )
                .context("Failed to create vision model client")?;
                Ok(Arc::new(analyzer))
            }
            None => Ok(Arc::new(CannedAnalyzer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[]).expect("Failed to load config");

        assert_eq!(config.api_host, "0.0.0.0");
        assert_eq!(config.api_port, 5000);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.analysis_timeout_secs, 60);
    }

    #[test]
    fn test_api_address() {
        let config = load(&[("API_HOST", "127.0.0.1"), ("API_PORT", "9000")]).unwrap();

        assert_eq!(config.api_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_validate_invalid_port() {
        let result = load(&[("API_PORT", "0")]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("API_PORT must be greater than 0"));

        assert!(load(&[("API_PORT", "not-a-port")]).is_err());
    }

    #[test]
    fn test_validate_timeout_and_base_url() {
        assert!(load(&[("ANALYSIS_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("OPENAI_BASE_URL", "ftp://example.com")]).is_err());

        let config = load(&[("OPENAI_BASE_URL", "http://localhost:8000/v1/")]).unwrap();
        assert_eq!(config.openai_base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn test_blank_key_selects_canned_analyzer() {
        let config = load(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.analyzer().unwrap().name(), "canned");

        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert!(config.openai_api_key.is_some());
        assert_eq!(config.analyzer().unwrap().name(), "gpt-4o");
    }

    #[test]
    fn test_key_is_redacted_in_debug_output() {
        let config = load(&[("OPENAI_API_KEY", "sk-very-secret")]).unwrap();
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
