//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, InstallBinding};
use crate::error::{SetupError, SetupResult};
use crate::ui::{self, UiContext};
use std::path::PathBuf;

/// Keys accepted by `config set`
const VALID_KEYS: [&str; 7] = [
    "general.log_format",
    "release.api_url",
    "release.user_agent",
    "install.binding",
    "install.pinned_version",
    "install.script_url_template",
    "cache.root",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> SetupResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut config = config.clone();
            set_value(&mut config, &key, &value)?;
            manager.save(&config).await?;
            ui::step_ok(&UiContext::detect(), &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> SetupResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> SetupResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(&ctx, "Configuration initialized", &path.display().to_string());

    Ok(())
}

/// Apply a dot-separated key to `config`
fn set_value(config: &mut Config, key: &str, value: &str) -> SetupResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => return Err(invalid(key, "expected text or json")),
        },
        ["release", "api_url"] => config.release.api_url = value.to_string(),
        ["release", "user_agent"] => config.release.user_agent = value.to_string(),
        ["install", "binding"] => {
            config.install.binding = match value {
                "pinned" => InstallBinding::Pinned,
                "resolved" => InstallBinding::Resolved,
                _ => return Err(invalid(key, "expected pinned or resolved")),
            }
        }
        ["install", "pinned_version"] => config.install.pinned_version = value.to_string(),
        ["install", "script_url_template"] => {
            if !value.contains("{version}") {
                return Err(invalid(key, "template must contain {version}"));
            }
            config.install.script_url_template = value.to_string();
        }
        ["cache", "root"] => {
            config.cache.root = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        _ => {
            return Err(SetupError::ConfigInvalid {
                path: PathBuf::from(key),
                reason: format!("unknown key, expected one of: {}", VALID_KEYS.join(", ")),
            })
        }
    }

    Ok(())
}

fn invalid(key: &str, reason: &str) -> SetupError {
    SetupError::ConfigInvalid {
        path: PathBuf::from(key),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut config = Config::default();
        set_value(&mut config, "install.binding", "resolved").unwrap();
        set_value(&mut config, "install.pinned_version", "0.23.1").unwrap();
        set_value(&mut config, "cache.root", "/opt/cache").unwrap();

        assert_eq!(config.install.binding, InstallBinding::Resolved);
        assert_eq!(config.install.pinned_version, "0.23.1");
        assert_eq!(config.cache.root, Some(PathBuf::from("/opt/cache")));

        set_value(&mut config, "cache.root", "").unwrap();
        assert!(config.cache.root.is_none());
    }

    #[test]
    fn reject_unknown_key_and_bad_values() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "vm.name", "x").is_err());
        assert!(set_value(&mut config, "install.binding", "latest").is_err());
        assert!(set_value(&mut config, "install.script_url_template", "https://x").is_err());
        assert!(set_value(&mut config, "general.log_format", "yaml").is_err());
    }

    #[test]
    fn every_valid_key_is_settable() {
        for key in VALID_KEYS {
            let value = match key {
                "general.log_format" => "json",
                "install.binding" => "pinned",
                "install.script_url_template" => "https://mirror/{version}",
                _ => "value",
            };
            let mut config = Config::default();
            assert!(set_value(&mut config, key, value).is_ok(), "{}", key);
        }
    }
}
