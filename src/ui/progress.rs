//! Progress indicator for the install script, with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Longest output line shown next to the spinner
const MAX_MESSAGE_WIDTH: usize = 60;

/// Spinner showing the latest install script line.
///
/// Shows an indicatif spinner in interactive mode; in CI each line is
/// printed as it arrives.
#[derive(Clone)]
pub struct InstallProgress {
    bar: Option<ProgressBar>,
}

impl InstallProgress {
    /// Create a new progress indicator labelled with `version`
    pub fn new(ctx: &UiContext, version: &str) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new_spinner();
            if let Ok(spinner_style) = ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} Setting up esbuild {prefix}  {msg:.dim}  {elapsed:.dim}")
            {
                bar.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            bar.set_prefix(version.to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };
        Self { bar }
    }

    /// Process one line of install script output
    pub fn on_line(&self, line: String) {
        match self.bar {
            Some(ref bar) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    bar.set_message(truncate(trimmed));
                }
            }
            None => println!("  {}", style(line).dim()),
        }
    }

    /// Finish and clear the spinner.
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

fn truncate(line: &str) -> String {
    if line.chars().count() > MAX_MESSAGE_WIDTH {
        let head: String = line.chars().take(MAX_MESSAGE_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
