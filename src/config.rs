//! Configuration: `~/.essaycoach/config.toml`, created on first run.
//!
//! The grading credential is resolved env-first (`OPENAI_API_KEY`) so the file
//! never has to hold a secret. A missing credential is a startup warning, not
//! an error — feedback requests then fail at call time.

use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Fixed sampling temperature for grading requests.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_GATEWAY_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml — computed, not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Grading API key. `OPENAI_API_KEY` in the environment wins over this.
    pub api_key: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Client-side view of the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL the editor client talks to. Fixed per install; no discovery.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_base_url() -> String {
    DEFAULT_GATEWAY_BASE_URL.into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            port: default_port(),
            model: default_model(),
            temperature: default_temperature(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    /// Loads `~/.essaycoach/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        let coach_dir = home.join(".essaycoach");
        let config_path = coach_dir.join("config.toml");

        if !coach_dir.exists() {
            fs::create_dir_all(&coach_dir)?;
        }

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    /// Loads a config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Save(e.to_string()))?;
        fs::write(&self.config_path, contents)?;
        Ok(())
    }

    /// Grading credential, environment first.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var("OPENAI_API_KEY").ok())
    }

    /// Listening port: `PORT` env override, then the config value.
    pub fn resolve_port(&self) -> u16 {
        self.port_with_env(std::env::var("PORT").ok())
    }

    // Precedence logic takes the env value as a parameter so it can be
    // exercised without touching process-global state.

    fn api_key_with_env(&self, env_key: Option<String>) -> Option<String> {
        env_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    fn port_with_env(&self, env_port: Option<String>) -> u16 {
        env_port
            .and_then(|p| p.parse().ok())
            .unwrap_or(self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_contract() {
        let config = Config::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.gateway.base_url, "http://localhost:3001");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let config = Config {
            config_path: path.clone(),
            api_key: Some("sk-file".into()),
            port: 4000,
            ..Config::default()
        };
        config.save().unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.port, 4000);
        assert_eq!(loaded.api_key.as_deref(), Some("sk-file"));
        assert_eq!(loaded.model, "gpt-4o-mini");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "port = 8088\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.port, 8088);
        assert_eq!(loaded.model, "gpt-4o-mini");
        assert!((loaded.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let config = Config {
            api_key: Some("sk-file".into()),
            ..Config::default()
        };
        assert_eq!(
            config.api_key_with_env(Some("sk-env".into())).as_deref(),
            Some("sk-env")
        );
        assert_eq!(config.api_key_with_env(None).as_deref(), Some("sk-file"));
    }

    #[test]
    fn blank_env_key_falls_back_to_file_key() {
        let config = Config {
            api_key: Some("sk-file".into()),
            ..Config::default()
        };
        assert_eq!(
            config.api_key_with_env(Some("   ".into())).as_deref(),
            Some("sk-file")
        );
        assert_eq!(
            config.api_key_with_env(Some("  sk-env  ".into())).as_deref(),
            Some("sk-env")
        );
    }

    #[test]
    fn no_key_anywhere_resolves_to_none() {
        let config = Config::default();
        assert!(config.api_key_with_env(None).is_none());
        assert!(config.api_key_with_env(Some(String::new())).is_none());
    }

    #[test]
    fn env_port_overrides_file_port() {
        let config = Config {
            port: 4000,
            ..Config::default()
        };
        assert_eq!(config.port_with_env(Some("5000".into())), 5000);
        assert_eq!(config.port_with_env(None), 4000);
    }

    #[test]
    fn unparseable_env_port_falls_back_to_file_port() {
        let config = Config {
            port: 4000,
            ..Config::default()
        };
        assert_eq!(config.port_with_env(Some("not-a-port".into())), 4000);
        assert_eq!(config.port_with_env(Some("99999999".into())), 4000);
    }

    #[test]
    fn invalid_toml_is_a_load_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "port = \"not a number").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
