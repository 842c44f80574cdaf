//! Configuration management for setup-esbuild

pub mod schema;

pub use schema::{Config, InstallBinding};

use crate::error::{SetupError, SetupResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Environment variable naming the runner's tool cache directory
pub const TOOL_CACHE_ENV: &str = "RUNNER_TOOL_CACHE";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("setup-esbuild")
            .join("config.toml")
    }

    /// Cache root used when neither the runner nor the config names one
    pub fn default_tool_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("setup-esbuild")
            .join("tool-cache")
    }

    /// Resolve the tool cache root: runner env, then config, then default
    pub fn tool_cache_dir(config: &Config) -> PathBuf {
        if let Some(dir) = std::env::var_os(TOOL_CACHE_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        config
            .cache
            .root
            .clone()
            .unwrap_or_else(Self::default_tool_cache_dir)
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub async fn load(&self) -> SetupResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> SetupResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| SetupError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| SetupError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> SetupResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            SetupError::io(format!("writing config to {}", self.config_path.display()), e)
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    async fn ensure_config_dir(&self) -> SetupResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SetupError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.install.binding, InstallBinding::Pinned);
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.install.binding = InstallBinding::Resolved;
        config.cache.root = Some(PathBuf::from("/opt/tool-cache"));

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.install.binding, InstallBinding::Resolved);
        assert_eq!(loaded.cache.root, Some(PathBuf::from("/opt/tool-cache")));
    }

    #[tokio::test]
    async fn invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[install]\nbinding = 42\n").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        assert!(matches!(err, SetupError::ConfigInvalid { path: ref p, .. } if *p == path));
    }

    #[test]
    #[serial]
    fn tool_cache_dir_prefers_runner_env() {
        let mut config = Config::default();
        config.cache.root = Some(PathBuf::from("/from/config"));

        std::env::set_var(TOOL_CACHE_ENV, "/from/runner");
        assert_eq!(ConfigManager::tool_cache_dir(&config), PathBuf::from("/from/runner"));

        std::env::remove_var(TOOL_CACHE_ENV);
        assert_eq!(ConfigManager::tool_cache_dir(&config), PathBuf::from("/from/config"));

        config.cache.root = None;
        assert_eq!(
            ConfigManager::tool_cache_dir(&config),
            ConfigManager::default_tool_cache_dir()
        );
    }
}
