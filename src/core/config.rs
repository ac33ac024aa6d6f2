use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RatesConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Seconds a loaded rate table is served before the next request reloads
    /// it. `0` keeps the first table for the life of the process.
    pub refresh_interval_secs: u64,
    /// Skip the network entirely and use the static table.
    pub offline: bool,
}

impl Default for RatesConfig {
    fn default() -> Self {
        RatesConfig {
            base_url: "https://api.exchangerate-api.com".to_string(),
            timeout_secs: 3,
            refresh_interval_secs: 3600,
            offline: false,
        }
    }
}

impl RatesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub cors_allow_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_allow_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Currency used by CLI commands when none is given.
    pub currency: String,
    pub rates: RatesConfig,
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: "COP".to_string(),
            rates: RatesConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no file has been set up there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "finsense", "finsense")
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
currency: "USD"
rates:
  base_url: "http://localhost:9000"
  timeout_secs: 1
  refresh_interval_secs: 0
  offline: true
server:
  listen_addr: "0.0.0.0:8080"
  cors_allow_origins:
    - "http://localhost:3000"
  request_timeout_secs: 10
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.rates.base_url, "http://localhost:9000");
        assert_eq!(config.rates.timeout(), Duration::from_secs(1));
        assert_eq!(config.rates.refresh_interval(), None);
        assert!(config.rates.offline);
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.server.cors_allow_origins,
            vec!["http://localhost:3000".to_string()]
        );
        assert_eq!(config.server.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("rates:\n  timeout_secs: 5\n").unwrap();
        assert_eq!(config.currency, "COP");
        assert_eq!(config.rates.timeout_secs, 5);
        assert_eq!(config.rates.base_url, "https://api.exchangerate-api.com");
        assert_eq!(
            config.rates.refresh_interval(),
            Some(Duration::from_secs(3600))
        );
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("nope.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
