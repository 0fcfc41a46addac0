use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub delegate: DelegateConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the optional LLM delegate.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DelegateConfig {
    #[serde(default = "DelegateConfig::default_enabled")]
    pub enabled: bool,
    /// Credential used when a request does not carry its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "DelegateConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "DelegateConfig::default_model")]
    pub model: String,
    #[serde(default = "DelegateConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DelegateConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            api_key: None,
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl DelegateConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_base_url() -> String {
        "https://open.bigmodel.cn/api/paas/v4".to_string()
    }

    fn default_model() -> String {
        "glm-4-flash".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        15
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The credential to use: a non-blank request key, else the configured one
    /// unless it is still the template placeholder. `None` when the delegate is
    /// disabled.
    #[must_use]
    pub fn resolve_api_key<'a>(&'a self, request_key: Option<&'a str>) -> Option<&'a str> {
        if !self.enabled {
            return None;
        }
        request_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty() && *key != API_KEY_PLACEHOLDER)
            })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

impl ServerConfig {
    fn default_bind() -> String {
        "127.0.0.1:8000".to_string()
    }
}

/// Stand-in key written by `init`; never sent to the delegate.
const API_KEY_PLACEHOLDER: &str = "your-zhipu-api-key-here";

const CONFIG_TEMPLATE: &str = r#"{
  "delegate": {
    "enabled": false,
    "api_key": "your-zhipu-api-key-here",
    "base_url": "https://open.bigmodel.cn/api/paas/v4",
    "model": "glm-4-flash",
    "timeout_secs": 15
  },
  "server": {
    "bind": "127.0.0.1:8000"
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("scout"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load the config file; a missing file yields the defaults.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::from_path(&config_path)
        } else {
            info!(
                "No config at {}, using defaults (pattern extraction only)",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }
        std::fs::write(config_path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scout-config-{}-{name}", std::process::id()))
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_parses_with_expected_values() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");
        assert!(!config.delegate.enabled);
        assert_eq!(config.delegate.timeout(), Duration::from_secs(15));
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty object is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.delegate.api_key, None);
    }

    #[test]
    fn resolve_api_key_precedence() {
        let mut delegate = DelegateConfig {
            api_key: Some("configured".to_string()),
            ..DelegateConfig::default()
        };
        assert_eq!(delegate.resolve_api_key(Some("request")), Some("request"));
        assert_eq!(delegate.resolve_api_key(Some("  ")), Some("configured"));
        assert_eq!(delegate.resolve_api_key(None), Some("configured"));

        delegate.enabled = false;
        assert_eq!(delegate.resolve_api_key(Some("request")), None);

        let bare = DelegateConfig::default();
        assert_eq!(bare.resolve_api_key(None), None);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn fresh_template_never_reaches_the_delegate() {
        let mut config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");
        assert_eq!(config.delegate.resolve_api_key(None), None);

        // Enabling without replacing the placeholder still yields no key.
        config.delegate.enabled = true;
        assert_eq!(config.delegate.resolve_api_key(None), None);
        assert_eq!(
            config.delegate.resolve_api_key(Some("real-key")),
            Some("real-key")
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_is_written_once() {
        let path = scratch_path("template.json");
        let _ = std::fs::remove_file(&path);

        Config::write_template(&path).expect("first write should succeed");
        assert!(Config::write_template(&path).is_err());

        let config = Config::from_path(&path).expect("written template should load");
        assert_eq!(config.delegate.model, "glm-4-flash");

        std::fs::remove_file(&path).expect("scratch file should be removable");
    }
}
