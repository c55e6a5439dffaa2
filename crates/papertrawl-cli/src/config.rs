//! Configuration loading from TOML files

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use papertrawl_pubmed::eutils;

/// Global configuration for papertrawl
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pubmed: PubmedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PubmedConfig {
    pub esearch_url: String,
    pub efetch_url: String,
    /// NCBI API key; may be given as ${VAR} to read an environment
    /// variable. Falls back to NCBI_API_KEY.
    #[serde(deserialize_with = "deserialize_env_var")]
    pub api_key: Option<String>,
}

impl Default for PubmedConfig {
    fn default() -> Self {
        Self {
            esearch_url: eutils::ESEARCH_URL.to_string(),
            efetch_url: eutils::EFETCH_URL.to_string(),
            api_key: std::env::var("NCBI_API_KEY").ok(),
        }
    }
}

/// Deserialize a string that may contain an environment variable
/// reference like ${VAR}
fn deserialize_env_var<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| expand_env_var(&s)))
}

/// Expand ${VAR} to its environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./papertrawl.toml (current directory)
    /// 2. ~/.config/papertrawl/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("papertrawl.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "papertrawl") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_eutils_endpoints() {
        let config = Config::default();
        assert!(config.pubmed.esearch_url.contains("esearch.fcgi"));
        assert!(config.pubmed.efetch_url.contains("efetch.fcgi"));
    }

    #[test]
    fn expand_env_var_simple() {
        std::env::set_var("PAPERTRAWL_TEST_VAR", "test_value");
        assert_eq!(
            expand_env_var("${PAPERTRAWL_TEST_VAR}"),
            Some("test_value".to_string())
        );
        std::env::remove_var("PAPERTRAWL_TEST_VAR");
    }

    #[test]
    fn expand_env_var_literal() {
        assert_eq!(expand_env_var("literal"), Some("literal".to_string()));
    }

    #[test]
    fn expand_env_var_missing() {
        assert_eq!(expand_env_var("${NONEXISTENT_VAR_12345}"), None);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[pubmed]
esearch_url = "http://localhost:9999/esearch"
efetch_url = "http://localhost:9999/efetch"
api_key = "abc123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pubmed.esearch_url, "http://localhost:9999/esearch");
        assert_eq!(config.pubmed.efetch_url, "http://localhost:9999/efetch");
        assert_eq!(config.pubmed.api_key, Some("abc123".to_string()));
    }
}
