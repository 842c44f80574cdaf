//! Decides between styled terminal output and plain runner log lines

use std::io::IsTerminal;

/// Variables whose presence means a CI runner is driving the process.
/// `RUNNER_TOOL_CACHE` covers self-hosted runners that skip `CI`.
const RUNNER_MARKERS: [&str; 6] = [
    "CI",
    "GITHUB_ACTIONS",
    "RUNNER_TOOL_CACHE",
    "GITLAB_CI",
    "BUILDKITE",
    "TF_BUILD",
];

/// Where output is going
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
}

impl UiContext {
    /// Inspect stdout and the environment
    pub fn detect() -> Self {
        let on_terminal = std::io::stdout().is_terminal();
        Self {
            interactive: on_terminal && !on_runner(|var| std::env::var_os(var).is_some()),
        }
    }

    /// Plain output regardless of the environment
    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Spinners and cliclack framing only make sense on a live terminal
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}

fn on_runner(is_set: impl Fn(&str) -> bool) -> bool {
    RUNNER_MARKERS.iter().any(|var| is_set(var))
}
