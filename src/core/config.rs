use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use tracing::debug;

/// Environment variable holding the Fixer API access key. It takes
/// precedence over the config file so the credential never has to be
/// written to disk.
pub const API_KEY_ENV: &str = "FIXER_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixerProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub fixer: Option<FixerProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fixer: Some(FixerProviderConfig {
                base_url: "http://data.fixer.io".to_string(),
            }),
        }
    }
}

/// Initial panel selection, applied before the first attempt.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DefaultsConfig {
    pub source: Option<String>,
    pub target: Option<String>,
    pub amount: Option<String>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    250
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Resolves the Fixer API access key: environment first, config
    /// file second. Absent in both is a startup error.
    pub fn resolve_api_key(&self) -> Result<String> {
        env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.is_empty()))
            .with_context(|| {
                format!("No Fixer API key found; set {API_KEY_ENV} or api_key in the config file")
            })
    }

    pub fn fixer_base_url(&self) -> &str {
        self.providers
            .fixer
            .as_ref()
            .map_or("http://data.fixer.io", |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
api_key: "test-key"
providers:
  fixer:
    base_url: "http://example.com/fixer"
timeout_secs: 5
debounce_ms: 100
defaults:
  source: "BRL"
  target: "USD"
  amount: "1"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.fixer_base_url(), "http://example.com/fixer");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.defaults.source.as_deref(), Some("BRL"));
        assert_eq!(config.defaults.target.as_deref(), Some("USD"));
        assert_eq!(config.defaults.amount.as_deref(), Some("1"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");

        assert!(config.api_key.is_none());
        assert_eq!(config.fixer_base_url(), "http://data.fixer.io");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.debounce_ms, 250);
        assert!(config.defaults.source.is_none());
    }

    #[test]
    fn test_empty_api_key_in_file_is_absent() {
        let yaml_str = r#"
api_key: ""
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        // An empty key placeholder from `fxc setup` must not be treated
        // as a credential.
        if env::var(API_KEY_ENV).is_err() {
            assert!(config.resolve_api_key().is_err());
        }
    }
}
