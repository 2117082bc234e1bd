//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use modshelf_core::{Section, SortMode};

#[derive(Parser)]
#[command(name = "modshelf")]
#[command(about = "Search the Minecraft mod catalog", long_about = None)]
pub(crate) struct Cli {
    /// Game directory (defaults to the saved setting, then ~/.minecraft)
    #[arg(short = 'd', long, global = true)]
    pub game_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the catalog connection.
#[derive(Args, Clone)]
pub(crate) struct CatalogArgs {
    /// Catalog API base URL (overrides config and MODSHELF_CATALOG_URL)
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Catalog API key (overrides config and MODSHELF_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Clone)]
pub(crate) struct SearchArgs {
    /// Name filter
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Game version to search for (ignored when --version is given)
    #[arg(short, long, default_value = "")]
    pub game_version: String,

    /// Installed version whose jar decides the game version
    #[arg(long)]
    pub version: Option<String>,

    /// Category id, 0 for all (see `modshelf categories`)
    #[arg(short, long, default_value_t = 0)]
    pub category: i32,

    /// Sort order (created, popularity, updated, name, author, downloads)
    #[arg(short, long, default_value = "created")]
    pub sort: SortMode,

    /// Result page, starting at 0
    #[arg(short, long, default_value_t = 0)]
    pub page: u32,

    /// Catalog section (mods, resourcepacks, worlds, modpacks, customization)
    #[arg(long, default_value = "mods")]
    pub section: Section,

    /// Open the Nth result (1-based) and list its files
    #[arg(long)]
    pub open: Option<usize>,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Search the catalog
    Search(SearchArgs),

    /// List the categories of a section
    Categories {
        /// Catalog section
        #[arg(long, default_value = "mods")]
        section: Section,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List installed versions and their detected game version
    Versions,

    /// Manage catalog and game directory configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the catalog configuration and where each value comes from
    Show,

    /// Print the config file path
    Path,

    /// Write a catalog config file with the current values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Save the default game directory (clears it when DIR is omitted)
    SetGameDir {
        dir: Option<PathBuf>,
    },
}
