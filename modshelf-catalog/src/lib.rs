//! Client for the remote mod catalog: paginated search, category trees,
//! and entry detail, plus the client's TOML/env configuration.

pub mod client;
pub mod config;
pub mod error;

pub use client::{CatalogClient, CatalogFuture, CurseClient, search_params};
pub use config::{CatalogConfig, ConfigSource, ConfigSources, config_path, config_sources, save_to_file};
pub use error::CatalogError;
