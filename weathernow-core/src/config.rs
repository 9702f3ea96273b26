use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::{ProviderId, airquality, ipgeolocation, opencage, openmeteo};

/// Configuration for a single keyed provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Base URLs of the four upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub local_time: String,
    pub air_quality: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: opencage::DEFAULT_BASE_URL.to_string(),
            forecast: openmeteo::DEFAULT_BASE_URL.to_string(),
            local_time: ipgeolocation::DEFAULT_BASE_URL.to_string(),
            air_quality: airquality::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Example TOML:
    /// [providers.opencage]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,

    pub endpoints: Endpoints,

    /// Per-request timeout. Absent means the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from the platform location, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-now", "weather-now")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });
    }

    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }

    /// Like [`Config::provider_api_key`], with a hint on how to fix a missing key.
    pub fn require_api_key(&self, provider_id: ProviderId) -> Result<&str> {
        self.provider_api_key(provider_id).ok_or_else(|| {
            anyhow!(
                "No API key configured for provider '{provider_id}'.\n\
                 Hint: run `weather-now configure {provider_id}` and enter your API key."
            )
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_with_hint() {
        let cfg = Config::default();
        let err = cfg.require_api_key(ProviderId::OpenCage).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured for provider 'opencage'"));
        assert!(msg.contains("weather-now configure opencage"));
    }

    #[test]
    fn upsert_replaces_existing_key() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::IpGeolocation, "OLD".into());
        cfg.upsert_provider_api_key(ProviderId::IpGeolocation, "NEW".into());

        assert_eq!(cfg.provider_api_key(ProviderId::IpGeolocation), Some("NEW"));
        assert!(cfg.is_provider_configured(ProviderId::IpGeolocation));
        assert!(!cfg.is_provider_configured(ProviderId::OpenCage));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert!(cfg.providers.is_empty());
        assert_eq!(cfg.endpoints, Endpoints::default());
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn save_then_load_keeps_keys_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenCage, "OC_KEY".into());
        cfg.endpoints.forecast = "http://localhost:9000".into();
        cfg.request_timeout_secs = Some(5);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider_api_key(ProviderId::OpenCage), Some("OC_KEY"));
        assert_eq!(loaded.endpoints.forecast, "http://localhost:9000");
        assert_eq!(loaded.endpoints.geocoding, opencage::DEFAULT_BASE_URL);
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn partial_endpoints_table_keeps_other_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [endpoints]
            air_quality = "http://127.0.0.1:1234"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.endpoints.air_quality, "http://127.0.0.1:1234");
        assert_eq!(cfg.endpoints.local_time, ipgeolocation::DEFAULT_BASE_URL);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "providers = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
