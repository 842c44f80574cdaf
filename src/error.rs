//! Error types for setup-esbuild
//!
//! All modules use `SetupResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for setup-esbuild operations
pub type SetupResult<T> = Result<T, SetupError>;

/// Message reported when the procedure fails without a typed error (a panic)
pub const UNEXPECTED_FAILURE: &str = "An unexpected error occurred";

/// All errors that can occur while setting up esbuild
#[derive(Error, Debug)]
pub enum SetupError {
    // Version resolution errors
    #[error("Failed to fetch latest version: {reason}")]
    Fetch { status: u16, reason: String },

    #[error("Failed to reach release feed {url}: {reason}")]
    FeedUnreachable { url: String, reason: String },

    #[error("Failed to parse release feed response: {0}")]
    Parse(String),

    // Environment errors
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    // Install errors
    #[error("Failed to install esbuild: {0}")]
    Install(String),

    #[error("Failed to run install command: {command}")]
    InstallCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Cache errors
    #[error("Failed to write tool cache entry {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("esbuild {version} ({arch}) is not in the tool cache")]
    NotCached { version: String, arch: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{}", UNEXPECTED_FAILURE)]
    Unexpected,
}

impl SetupError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a cache write error for the given path
    pub fn cache_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            path: path.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { status: 403, .. } | Self::Fetch { status: 429, .. } => {
                Some("GitHub API rate limit hit. Set GITHUB_TOKEN or pin a version")
            }
            Self::UnsupportedPlatform(_) => Some("esbuild setup supports Linux and macOS runners"),
            Self::Install(_) | Self::InstallCommand { .. } => {
                Some("The installer needs curl and sh on PATH")
            }
            _ => None,
        }
    }
}
