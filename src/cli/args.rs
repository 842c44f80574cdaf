//! CLI argument definitions using clap derive

use crate::config::InstallBinding;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// setup-esbuild - install esbuild on CI runners
///
/// Resolves an esbuild version, reuses the runner tool cache when it can,
/// and otherwise installs and caches the binary before adding it to PATH.
#[derive(Parser, Debug)]
#[command(name = "setup-esbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SETUP_ESBUILD_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install esbuild (or reuse the cached copy) and add it to PATH
    Install(InstallArgs),

    /// Print the cached esbuild directory for a version
    Find(FindArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Print shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// esbuild version to install; falls back to INPUT_VERSION, then latest
    #[arg(long = "tool-version", value_name = "VERSION")]
    pub tool_version: Option<String>,

    /// Which release the install script is fetched for
    #[arg(long, value_enum)]
    pub binding: Option<InstallBinding>,

    /// Tool cache root (defaults to RUNNER_TOOL_CACHE, then config)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Directory the install script runs in (defaults to current directory)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}

/// Arguments for the find command
#[derive(Parser, Debug)]
pub struct FindArgs {
    /// esbuild version to look up
    #[arg(id = "find_version", value_name = "VERSION")]
    pub version: String,

    /// Architecture (defaults to the host architecture)
    #[arg(long)]
    pub arch: Option<String>,

    /// Tool cache root (defaults to RUNNER_TOOL_CACHE, then config)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value (e.g. install.binding resolved)
    Set {
        /// Dot-separated key
        key: String,

        /// New value
        value: String,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
