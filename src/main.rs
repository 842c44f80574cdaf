//! setup-esbuild - esbuild installer for CI runners
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use setup_esbuild::cli::{Cli, Commands};
use setup_esbuild::config::{Config, ConfigManager};
use setup_esbuild::error::{SetupError, SetupResult};
use setup_esbuild::runner::RunnerEnv;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // A panic inside the procedure still ends in a single failure report
    let result = match tokio::spawn(run()).await {
        Ok(result) => result,
        Err(_) => Err(SetupError::Unexpected),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_failure(e: &SetupError) {
    let message = e.to_string();
    if let Some(signal) = RunnerEnv::detect().failure_signal(&message) {
        println!("{}", signal);
    }
    eprintln!("{} {}", style("Error:").red().bold(), message);
    if let Some(hint) = e.hint() {
        eprintln!("{} {}", style("Hint:").yellow(), hint);
    }
}

fn init_logging(verbose: u8, config: &Config) {
    // 0 = warn, 1 = info, 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("setup_esbuild=warn"),
        1 => EnvFilter::new("setup_esbuild=info"),
        _ => EnvFilter::new("setup_esbuild=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

async fn run() -> SetupResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions(args) = cli.command {
        setup_esbuild::cli::commands::completions(args);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Install(args) => setup_esbuild::cli::commands::install(args, &config).await,
        Commands::Find(args) => setup_esbuild::cli::commands::find(args, &config).await,
        Commands::Config(args) => {
            setup_esbuild::cli::commands::config(args, &config_manager, &config).await
        }
        Commands::Completions(_) => Ok(()),
    }
}
