//! Listing API configuration.
//!
//! Settings are assembled from layers, later layers winning:
//! config file (with the `config` feature), then environment, then command line.

use crate::error::{AutocatError, Result};
use serde::Deserialize;
#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

/// Resolved settings for the listing API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_host: String,
    pub api_key: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://cars-by-api-ninjas.p.rapidapi.com/v1/cars";
    pub const DEFAULT_API_HOST: &'static str = "cars-by-api-ninjas.p.rapidapi.com";

    /// Fill defaults into a merged layer. The API key has no default.
    pub fn resolve(layer: ConfigLayer) -> Result<Self> {
        let api_key = layer
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AutocatError::config(
                    "no API key: set AUTOCAT_API_KEY (or RAPIDAPI_KEY) or pass --api-key",
                )
            })?;

        Ok(Self {
            base_url: layer
                .base_url
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string()),
            api_host: layer
                .api_host
                .unwrap_or_else(|| Self::DEFAULT_API_HOST.to_string()),
            api_key,
        })
    }
}

/// One source of partial settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub api_host: Option<String>,
}

impl ConfigLayer {
    /// Read `AUTOCAT_API_KEY` (falling back to `RAPIDAPI_KEY`), `AUTOCAT_BASE_URL`
    /// and `AUTOCAT_API_HOST`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("AUTOCAT_API_KEY").or_else(|| lookup("RAPIDAPI_KEY")),
            base_url: lookup("AUTOCAT_BASE_URL"),
            api_host: lookup("AUTOCAT_API_HOST"),
        }
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ConfigLayer) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            base_url: other.base_url.or(self.base_url),
            api_host: other.api_host.or(self.api_host),
        }
    }

    /// Parse a TOML config file.
    #[cfg(feature = "config")]
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            AutocatError::file_error(format!("cannot read {}", path.display()), err)
        })?;
        toml::from_str(&contents).map_err(|err| {
            AutocatError::config(format!("invalid config file {}: {}", path.display(), err))
        })
    }

    /// `<config_dir>/autocat/config.toml`, if the platform has a config dir.
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("autocat").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> ConfigLayer {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigLayer::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn resolve_fills_defaults() {
        let config = ApiConfig::resolve(env(&[("AUTOCAT_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, ApiConfig::DEFAULT_BASE_URL);
        assert_eq!(config.api_host, ApiConfig::DEFAULT_API_HOST);
    }

    #[test]
    fn rapidapi_key_is_a_fallback() {
        let layer = env(&[("RAPIDAPI_KEY", "fallback")]);
        assert_eq!(layer.api_key.as_deref(), Some("fallback"));

        let layer = env(&[("RAPIDAPI_KEY", "fallback"), ("AUTOCAT_API_KEY", "primary")]);
        assert_eq!(layer.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn missing_or_blank_key_is_a_config_error() {
        let err = ApiConfig::resolve(ConfigLayer::default()).unwrap_err();
        assert!(matches!(err, AutocatError::ConfigError { .. }));

        let blank = ConfigLayer {
            api_key: Some("  ".to_string()),
            ..ConfigLayer::default()
        };
        assert!(ApiConfig::resolve(blank).is_err());
    }

    #[test]
    fn later_layers_win() {
        let file = ConfigLayer {
            api_key: Some("from-file".to_string()),
            base_url: Some("http://file".to_string()),
            api_host: None,
        };
        let cli = ConfigLayer {
            base_url: Some("http://cli".to_string()),
            ..ConfigLayer::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.api_key.as_deref(), Some("from-file"));
        assert_eq!(merged.base_url.as_deref(), Some("http://cli"));
        assert_eq!(merged.api_host, None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn reads_toml_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "api_key = \"toml-key\"\napi_host = \"example.test\"\n",
        )
        .unwrap();

        let layer = ConfigLayer::from_file(file.path()).unwrap();
        assert_eq!(layer.api_key.as_deref(), Some("toml-key"));
        assert_eq!(layer.api_host.as_deref(), Some("example.test"));
        assert_eq!(layer.base_url, None);
    }
}
