//! Install step: fetch the esbuild install script and run it
//!
//! The whole step is one awaited shell invocation. A non-zero exit, a
//! failed spawn, or a missing binary afterwards all surface as
//! [`SetupError::Install`] through the normal error channel.

use crate::error::{SetupError, SetupResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Executable produced by the install script
pub const BINARY_NAME: &str = "esbuild";

/// Max number of output lines to include in install error messages.
const INSTALL_ERROR_TAIL_LINES: usize = 20;

/// Provisions the esbuild binary on the host
#[async_trait]
pub trait InstallStep: Send + Sync {
    /// Install from `script_url` and return the path of the produced executable
    async fn install(&self, script_url: &str) -> SetupResult<PathBuf>;
}

/// Build the two-line install script for a script URL
pub fn install_script(script_url: &str) -> String {
    format!("curl -fsSL {} | sh\nchmod +x {}", script_url, BINARY_NAME)
}

/// Runs the install script with `sh` in a working directory
pub struct ShellInstaller {
    work_dir: PathBuf,
    shell: String,
    on_output: Box<dyn Fn(String) + Send + Sync>,
}

impl ShellInstaller {
    /// Create an installer that drops the binary into `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            shell: "sh".to_string(),
            on_output: Box::new(|line| info!("{}", line)),
        }
    }

    /// Use a different shell interpreter
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Receive each line the install script prints
    pub fn with_output(mut self, on_output: impl Fn(String) + Send + Sync + 'static) -> Self {
        self.on_output = Box::new(on_output);
        self
    }

    /// Working directory the binary is installed into
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run `script` and return an error carrying the output tail on failure
    pub async fn run_script(&self, script: &str) -> SetupResult<()> {
        debug!("Executing in {}: {} -c {:?}", self.work_dir.display(), self.shell, script);

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(script)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SetupError::InstallCommand {
                command: format!("{} -c {:?}", self.shell, script),
                source: e,
            })?;

        let output = stream_child_output(&mut child, &*self.on_output).await;
        let status = child
            .wait()
            .await
            .map_err(|e| SetupError::io("waiting for install command", e))?;

        if status.success() {
            return Ok(());
        }

        let exit = match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        let tail = error_tail(&output);
        if tail.is_empty() {
            Err(SetupError::Install(exit))
        } else {
            Err(SetupError::Install(format!("{}\n{}", exit, tail)))
        }
    }
}

#[async_trait]
impl InstallStep for ShellInstaller {
    async fn install(&self, script_url: &str) -> SetupResult<PathBuf> {
        let binary = self.work_dir.join(BINARY_NAME);

        // The script exits with chmod's status, so a leftover binary would mask a failed download
        if path_exists(&binary).await? {
            debug!("Removing previous {}", binary.display());
            tokio::fs::remove_file(&binary)
                .await
                .map_err(|e| SetupError::io(format!("removing {}", binary.display()), e))?;
        }

        self.run_script(&install_script(script_url)).await?;

        if !path_exists(&binary).await? {
            return Err(SetupError::Install(format!(
                "install script finished but {} was not created",
                binary.display()
            )));
        }
        Ok(binary)
    }
}

async fn path_exists(path: &Path) -> SetupResult<bool> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|e| SetupError::io(format!("checking {}", path.display()), e))
}

/// Keep the last [`INSTALL_ERROR_TAIL_LINES`] lines of output.
fn error_tail(lines: &[String]) -> String {
    let start = lines.len().saturating_sub(INSTALL_ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Decode one raw output line, dropping the line terminator
fn take_line(buf: &mut Vec<u8>) -> String {
    let end = buf
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    let line = String::from_utf8_lossy(&buf[..end]).into_owned();
    buf.clear();
    line
}

/// Stream stdout+stderr from a child process, calling `on_output` for each line.
///
/// Lines are decoded lossily so invalid UTF-8 never stops the pipes from
/// draining. Returns all collected output lines for error reporting.
async fn stream_child_output(
    child: &mut Child,
    on_output: &(dyn Fn(String) + Send + Sync),
) -> Vec<String> {
    let mut all_output = Vec::new();
    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return all_output;
    };

    let mut stdout = BufReader::new(stdout);
    let mut stderr = BufReader::new(stderr);
    // read_until keeps partial data in these across select! cancellation
    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !stderr_done || !stdout_done {
        tokio::select! {
            read = stderr.read_until(b'\n', &mut stderr_buf), if !stderr_done => {
                match read {
                    Ok(n) if n > 0 => {
                        let line = take_line(&mut stderr_buf);
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    _ => stderr_done = true,
                }
            }
            read = stdout.read_until(b'\n', &mut stdout_buf), if !stdout_done => {
                match read {
                    Ok(n) if n > 0 => {
                        let line = take_line(&mut stdout_buf);
                        on_output(line.clone());
                        all_output.push(line);
                    }
                    _ => stdout_done = true,
                }
            }
        }
    }

    all_output
}
