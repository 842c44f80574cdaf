//! Install command - ensure esbuild is cached and on PATH

use crate::cli::args::InstallArgs;
use crate::config::{Config, ConfigManager};
use crate::error::{SetupError, SetupResult};
use crate::install::ShellInstaller;
use crate::installer::{Installer, Provision, SetupOutcome};
use crate::release::GithubReleaseFeed;
use crate::runner::{self, RunnerEnv};
use crate::toolcache::DirToolCache;
use crate::ui::{self, InstallProgress, UiContext};
use tracing::debug;

/// Execute the install command
pub async fn execute(args: InstallArgs, config: &Config) -> SetupResult<()> {
    let ctx = UiContext::detect();
    let runner = RunnerEnv::detect();

    let mut install = config.install.clone();
    if let Some(binding) = args.binding {
        install.binding = binding;
    }

    let cache_root = args
        .cache_dir
        .unwrap_or_else(|| ConfigManager::tool_cache_dir(config));
    let work_dir = match args.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| SetupError::io("getting current directory", e))?,
    };
    let configured = configured_version(args.tool_version);
    debug!(
        "Tool cache {}, work dir {}, binding {}",
        cache_root.display(),
        work_dir.display(),
        install.binding
    );

    ui::intro(&ctx, "setup-esbuild");

    let feed = GithubReleaseFeed::new(&config.release);
    let cache = DirToolCache::new(cache_root);
    let progress = InstallProgress::new(&ctx, configured.as_deref().unwrap_or("latest"));
    let sink = progress.clone();
    let step = ShellInstaller::new(work_dir).with_output(move |line| sink.on_line(line));

    let result = Installer::new(&feed, &cache, &step, install)
        .run(configured.as_deref())
        .await;
    progress.finish();
    let outcome = result?;

    let dir = outcome.tool_dir.display().to_string();
    match outcome.provision {
        Provision::Cached => {
            ui::step_ok_detail(&ctx, &format!("Using cached esbuild {}", outcome.version), &dir)
        }
        Provision::Installed => {
            ui::step_ok_detail(&ctx, &format!("Installed esbuild {}", outcome.version), &dir)
        }
    }

    publish(&ctx, &runner, &outcome)?;

    ui::outro_success(&ctx, &format!("esbuild {} is ready", outcome.version));
    Ok(())
}

/// Requested version: the flag when non-blank, else the `version` input
fn configured_version(flag: Option<String>) -> Option<String> {
    flag.map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| runner::input("version"))
}

/// Hand the outcome to later pipeline steps
fn publish(ctx: &UiContext, runner: &RunnerEnv, outcome: &SetupOutcome) -> SetupResult<()> {
    let dir = outcome.tool_dir.display().to_string();

    runner.set_output("version", outcome.version.as_str())?;
    runner.set_output("path", &dir)?;

    if runner.add_path(&outcome.tool_dir)? {
        ui::step_ok_detail(ctx, "Added to PATH", &dir);
    } else {
        ui::remark(ctx, "No runner PATH file found; add this directory to PATH:");
        ui::key_value(ctx, "path", &dir);
    }

    Ok(())
}
