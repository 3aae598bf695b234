use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::kakao::DEFAULT_BASE_URL;
use crate::search::SearchSettings;

/// Finest accepted grid step (roughly 10 m)
const MIN_GRID_SPACING_DEGREES: f64 = 0.0001;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub search: SearchSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Inline key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Environment variable holding the key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: "KAKAO_REST_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key from the config or the environment
    pub fn api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.trim().to_string());
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => bail!(
                "No API key configured; set provider.api_key or {}",
                self.api_key_env
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.provider.base_url)
            .with_context(|| format!("Invalid provider base_url '{}'", self.provider.base_url))?;
        let spacing = self.search.grid_spacing_degrees;
        if !(spacing.is_finite() && spacing >= MIN_GRID_SPACING_DEGREES) {
            bail!(
                "search.grid_spacing_degrees must be at least {}",
                MIN_GRID_SPACING_DEGREES
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider.timeout(), Duration::from_secs(10));
        assert_eq!(config.search, SearchSettings::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
            [provider]
            base_url = "http://localhost:8080"
            api_key = "abc123"

            [search]
            default_region = "제주"
            wide_page_size = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.provider.api_key().unwrap(), "abc123");
        assert_eq!(config.search.default_region, "제주");
        assert_eq!(config.search.wide_page_size, 3);
        assert_eq!(config.search.narrow_page_size, 15);
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let err = Config::from_toml("[provider]\nbase_url = \"not a url\"").unwrap_err();
        assert!(format!("{err:#}").contains("base_url"));
    }

    #[test]
    fn test_bad_grid_spacing_is_rejected() {
        assert!(Config::from_toml("[search]\ngrid_spacing_degrees = 0.0").is_err());
        assert!(Config::from_toml("[search]\ngrid_spacing_degrees = 1e-9").is_err());
        assert!(Config::from_toml("[search]\ngrid_spacing_degrees = 0.0001").is_ok());
    }

    #[test]
    fn test_api_key_from_environment() {
        let provider = ProviderConfig {
            api_key_env: "TRIPSCOUT_TEST_KEY_PRESENT".to_string(),
            ..ProviderConfig::default()
        };
        std::env::set_var("TRIPSCOUT_TEST_KEY_PRESENT", " from-env ");
        assert_eq!(provider.api_key().unwrap(), "from-env");

        let missing = ProviderConfig {
            api_key_env: "TRIPSCOUT_TEST_KEY_MISSING".to_string(),
            ..ProviderConfig::default()
        };
        assert!(missing.api_key().is_err());
    }
}
