use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};

/// Where the analytics backend listens unless told otherwise
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/ask";

/// Environment override for the endpoint
pub const ENDPOINT_ENV: &str = "ASK_ENDPOINT";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    /// No timeout when absent
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn save_endpoint(endpoint: &str) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.endpoint = Some(endpoint.to_string());
        config.save()
    }

    /// `ASK_ENDPOINT`, then the config file, then [`DEFAULT_ENDPOINT`].
    pub fn resolved_endpoint(&self) -> String {
        Self::pick_endpoint(std::env::var(ENDPOINT_ENV).ok(), self.endpoint.as_deref())
    }

    fn pick_endpoint(env_value: Option<String>, file_value: Option<&str>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| file_value.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("startel-ask"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            endpoint: Some("http://analytics.local:5000/api/ask".to_string()),
            timeout_ms: Some(30_000),
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn endpoint_precedence() {
        assert_eq!(Config::pick_endpoint(None, None), DEFAULT_ENDPOINT);
        assert_eq!(
            Config::pick_endpoint(None, Some("http://file/api/ask")),
            "http://file/api/ask"
        );
        assert_eq!(
            Config::pick_endpoint(Some("http://env/api/ask".to_string()), Some("http://file/api/ask")),
            "http://env/api/ask"
        );
        assert_eq!(
            Config::pick_endpoint(Some("  ".to_string()), Some("http://file/api/ask")),
            "http://file/api/ask"
        );
    }
}
