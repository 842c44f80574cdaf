//! setup-esbuild - esbuild installer for CI runners
//!
//! Resolves an esbuild version, reuses the runner tool cache when an entry
//! exists, and otherwise runs the upstream install script and caches the
//! result. The directory to put on PATH is returned to the caller.

pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod installer;
pub mod platform;
pub mod release;
pub mod runner;
pub mod toolcache;
pub mod ui;

pub use error::{SetupError, SetupResult};
pub use installer::{Installer, Provision, SetupOutcome};
