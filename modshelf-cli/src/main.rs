//! modshelf CLI
//!
//! Command-line interface for searching the Minecraft mod catalog.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modshelf_catalog::{CatalogConfig, CurseClient};

use cli_types::{CatalogArgs, Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Search(args) => commands::search::run_search(args, cli.game_dir, cli.quiet),
        Commands::Categories { section, catalog } => {
            commands::categories::run_categories(section, catalog, cli.quiet)
        }
        Commands::Versions => commands::versions::run_versions(cli.game_dir),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(cli.game_dir),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
            ConfigAction::SetGameDir { dir } => commands::config::run_config_set_game_dir(dir),
        },
    };

    if let Err(e) = result {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Build a catalog client from config, env, and command-line overrides.
pub(crate) fn connect(args: &CatalogArgs) -> Result<CurseClient, CliError> {
    let config = CatalogConfig::load()?
        .with_overrides(args.catalog_url.clone(), args.api_key.clone());
    log::debug!("Catalog at {}", config.base());
    Ok(CurseClient::new(config)?)
}

/// Build the runtime that drives catalog requests.
pub(crate) fn create_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}
