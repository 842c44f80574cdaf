//! Configuration schema for setup-esbuild
//!
//! Configuration is stored at `~/.config/setup-esbuild/config.toml`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Releases endpoint queried when no version is configured
pub const DEFAULT_RELEASE_API_URL: &str =
    "https://api.github.com/repos/evanw/esbuild/releases/latest";

/// esbuild release the install script is pinned to
pub const DEFAULT_PINNED_VERSION: &str = "0.24.0";

/// Install script location; `{version}` is replaced before fetching
pub const DEFAULT_SCRIPT_URL_TEMPLATE: &str = "https://esbuild.github.io/dl/v{version}";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Release feed settings
    pub release: ReleaseConfig,

    /// Install script settings
    pub install: InstallConfig,

    /// Tool cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Release feed used to resolve the latest version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Latest-release API endpoint
    pub api_url: String,

    /// User-Agent sent with API requests
    pub user_agent: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_RELEASE_API_URL.to_string(),
            user_agent: "setup-esbuild".to_string(),
        }
    }
}

/// Which version the install script is fetched for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InstallBinding {
    /// Always fetch the pinned release, whatever version was resolved
    #[default]
    Pinned,
    /// Fetch the release matching the resolved version
    Resolved,
}

impl fmt::Display for InstallBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pinned => write!(f, "pinned"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// Install script configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Binding between the resolved version and the fetched script
    pub binding: InstallBinding,

    /// Release fetched when `binding = "pinned"`
    pub pinned_version: String,

    /// Script URL with a `{version}` placeholder
    pub script_url_template: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            binding: InstallBinding::Pinned,
            pinned_version: DEFAULT_PINNED_VERSION.to_string(),
            script_url_template: DEFAULT_SCRIPT_URL_TEMPLATE.to_string(),
        }
    }
}

impl InstallConfig {
    /// Version whose install script gets fetched for a resolved version
    pub fn fetch_version<'a>(&'a self, resolved: &'a str) -> &'a str {
        match self.binding {
            InstallBinding::Pinned => &self.pinned_version,
            InstallBinding::Resolved => resolved,
        }
    }

    /// Script URL for a resolved version
    pub fn script_url(&self, resolved: &str) -> String {
        self.script_url_template
            .replace("{version}", self.fetch_version(resolved))
    }
}

/// Tool cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root; `RUNNER_TOOL_CACHE` wins when set
    pub root: Option<PathBuf>,
}
