use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modshelf_catalog::{CatalogConfig, ConfigSource, config_path, config_sources, save_to_file};
use modshelf_lib::settings::{resolve_game_dir, save_game_dir, settings_path};

use crate::CliError;

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(2) {
        Some((end, _)) => format!("{}****", &s[..end]),
        None => "****".to_string(),
    }
}

/// Show the catalog configuration and where each value comes from.
pub(crate) fn run_config_show(game_dir: Option<PathBuf>) -> Result<(), CliError> {
    let path = config_path();
    let sources = config_sources();

    log::info!(
        "{}",
        "Catalog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let config = CatalogConfig::load()?;
    let fields: [(&str, &ConfigSource, Option<String>); 5] = [
        ("base_url", &sources.base_url, Some(config.base_url.clone())),
        (
            "api_key",
            &sources.api_key,
            config.api_key.as_deref().map(mask_value),
        ),
        (
            "page_size",
            &sources.page_size,
            Some(config.page_size.to_string()),
        ),
        (
            "timeout_secs",
            &sources.timeout_secs,
            Some(config.timeout_secs.to_string()),
        ),
        (
            "user_agent",
            &sources.user_agent,
            Some(config.user_agent.clone()),
        ),
    ];

    for (name, source, value) in &fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }

    crate::log_blank();
    log::info!(
        "  {} {}",
        "game_dir:".if_supports_color(Stdout, |t| t.cyan()),
        resolve_game_dir(game_dir).display(),
    );

    Ok(())
}

/// Print the catalog config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(path) => log::info!("{}", path.display()),
        None => {
            return Err(CliError::config("Could not determine config directory"));
        }
    }

    Ok(())
}

/// Write the effective catalog config to the config file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path =
        config_path().ok_or_else(|| CliError::config("Could not determine config directory"))?;
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let config = CatalogConfig::load()?;
    save_to_file(&config, &path)?;
    log::info!(
        "{} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );

    Ok(())
}

/// Save or clear the default game directory.
pub(crate) fn run_config_set_game_dir(dir: Option<PathBuf>) -> Result<(), CliError> {
    save_game_dir(dir.as_deref())?;
    match dir {
        Some(d) => log::info!(
            "{} Game directory set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            d.display(),
        ),
        None => log::info!(
            "{} Game directory cleared",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        ),
    }
    log::debug!("Settings file: {}", settings_path().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_secrets() {
        assert_eq!(mask_value("abcdef"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }
}
