//! Host platform detection
//!
//! Identifiers follow runner naming (`linux`, `darwin`, `x64`, `arm64`)
//! so cache entries line up with entries written by other setup steps.

use crate::error::{SetupError, SetupResult};
use std::fmt;

/// Operating systems esbuild can be installed on
pub const SUPPORTED_OS: [&str; 2] = ["darwin", "linux"];

/// Host platform descriptor, read once at start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating-system identifier (`linux`, `darwin`, `win32`, ...)
    pub os: String,
    /// CPU architecture identifier (`x64`, `arm64`, ...)
    pub arch: String,
}

impl Platform {
    /// Create a platform descriptor from explicit identifiers
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the current platform
    pub fn detect() -> Self {
        Self::new(
            os_identifier(std::env::consts::OS),
            arch_identifier(std::env::consts::ARCH),
        )
    }

    /// Fail unless the OS is one of [`SUPPORTED_OS`]. Any architecture is accepted.
    pub fn validate(&self) -> SetupResult<()> {
        if SUPPORTED_OS.contains(&self.os.as_str()) {
            Ok(())
        } else {
            Err(SetupError::UnsupportedPlatform(self.os.clone()))
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Map a Rust target OS name to its runner identifier
pub fn os_identifier(os: &str) -> String {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
    .to_string()
}

/// Map a Rust target architecture name to its runner identifier
pub fn arch_identifier(arch: &str) -> String {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        "powerpc64" => "ppc64",
        other => other,
    }
    .to_string()
}
