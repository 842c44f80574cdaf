//! The setup procedure
//!
//! resolve version → validate platform → look up cache → (hit: done) |
//! (miss: install → register in cache). The directory to put on the
//! search path is returned in [`SetupOutcome`]; applying it is up to the
//! caller.

use crate::config::schema::{InstallBinding, InstallConfig};
use crate::error::SetupResult;
use crate::install::{InstallStep, BINARY_NAME};
use crate::platform::Platform;
use crate::release::{resolve_version, ReleaseFeed, Version};
use crate::toolcache::{CacheKey, ToolCache};
use std::path::PathBuf;
use tracing::{info, warn};

/// Tool name used as the first cache key component
pub const TOOL_NAME: &str = "esbuild";

/// How the tool ended up in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provision {
    /// Found a complete cache entry
    Cached,
    /// Ran the install script and registered the result
    Installed,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// Version used as the cache key
    pub version: Version,
    /// Directory to append to the search path
    pub tool_dir: PathBuf,
    /// Whether the run hit the cache or installed
    pub provision: Provision,
}

/// Ensures esbuild is installed and cached
pub struct Installer<'a> {
    feed: &'a dyn ReleaseFeed,
    cache: &'a dyn ToolCache,
    step: &'a dyn InstallStep,
    install: InstallConfig,
    platform: Platform,
}

impl<'a> Installer<'a> {
    /// Wire up an installer for the detected host platform
    pub fn new(
        feed: &'a dyn ReleaseFeed,
        cache: &'a dyn ToolCache,
        step: &'a dyn InstallStep,
        install: InstallConfig,
    ) -> Self {
        Self {
            feed,
            cache,
            step,
            install,
            platform: Platform::detect(),
        }
    }

    /// Override the platform descriptor
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Run the procedure for an optional configured version
    pub async fn run(&self, configured_version: Option<&str>) -> SetupResult<SetupOutcome> {
        let version = resolve_version(configured_version, self.feed).await?;
        self.platform.validate()?;

        let key = CacheKey {
            tool: TOOL_NAME,
            version: version.as_str(),
            arch: &self.platform.arch,
        };

        let cached = self.cache.find(&key).await?;
        if let Some(tool_dir) = cached {
            info!("Using cached esbuild {}", version);
            return Ok(SetupOutcome {
                version,
                tool_dir,
                provision: Provision::Cached,
            });
        }

        info!("Setting up esbuild {} for {}", version, self.platform);

        let fetch_version = self.install.fetch_version(version.as_str());
        if self.install.binding == InstallBinding::Pinned && fetch_version != version.as_str() {
            warn!(
                "Install script is pinned to esbuild {} but the cache key is {}",
                fetch_version, version
            );
        }

        let binary = self
            .step
            .install(&self.install.script_url(version.as_str()))
            .await?;

        info!("Caching esbuild {}", version);
        let tool_dir = self.cache.cache_file(&binary, BINARY_NAME, &key).await?;

        info!("Successfully set up esbuild {}", version);
        Ok(SetupOutcome {
            version,
            tool_dir,
            provision: Provision::Installed,
        })
    }
}
