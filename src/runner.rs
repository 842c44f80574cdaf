//! CI runner integration
//!
//! Reads step inputs and publishes results the way GitHub Actions expects:
//! `INPUT_<NAME>` variables in, `GITHUB_PATH`/`GITHUB_OUTPUT` files and
//! `::error::` workflow commands out.

use crate::error::{SetupError, SetupResult};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Runner environment captured once at start
#[derive(Debug, Clone, Default)]
pub struct RunnerEnv {
    /// File collecting search path additions
    pub path_file: Option<PathBuf>,
    /// File collecting step outputs
    pub output_file: Option<PathBuf>,
    /// Running inside GitHub Actions
    pub github_actions: bool,
}

impl RunnerEnv {
    /// Capture the runner variables of the current process
    pub fn detect() -> Self {
        Self {
            path_file: env_path("GITHUB_PATH"),
            output_file: env_path("GITHUB_OUTPUT"),
            github_actions: std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true"),
        }
    }

    /// Append `dir` to the search path of later steps
    ///
    /// Returns false when no runner path file is available.
    pub fn add_path(&self, dir: &Path) -> SetupResult<bool> {
        let Some(ref file) = self.path_file else {
            return Ok(false);
        };
        append_line(file, &dir.display().to_string())?;
        Ok(true)
    }

    /// Record a step output
    pub fn set_output(&self, name: &str, value: &str) -> SetupResult<bool> {
        let Some(ref file) = self.output_file else {
            return Ok(false);
        };
        append_line(file, &format!("{}={}", name, value))?;
        Ok(true)
    }

    /// Render the failure signal for `message`
    pub fn failure_signal(&self, message: &str) -> Option<String> {
        self.github_actions
            .then(|| format!("::error::{}", escape_data(message)))
    }
}

/// Read a step input (`INPUT_VERSION` for `version`); empty means unset
pub fn input(name: &str) -> Option<String> {
    let var = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(var).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn append_line(file: &Path, line: &str) -> SetupResult<()> {
    let mut handle = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .map_err(|e| SetupError::io(format!("opening {}", file.display()), e))?;
    writeln!(handle, "{}", line)
        .map_err(|e| SetupError::io(format!("writing {}", file.display()), e))
}

/// Escape workflow command data (`%`, CR and LF)
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
