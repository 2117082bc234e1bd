use std::path::{Path, PathBuf};

use crate::error::CatalogError;

pub const DEFAULT_BASE_URL: &str = "https://addons-ecr.forgesvc.net/api/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("modshelf/", env!("CARGO_PKG_VERSION"));

const ENV_BASE_URL: &str = "MODSHELF_CATALOG_URL";
const ENV_API_KEY: &str = "MODSHELF_API_KEY";
const ENV_PAGE_SIZE: &str = "MODSHELF_PAGE_SIZE";
const ENV_TIMEOUT: &str = "MODSHELF_TIMEOUT";
const ENV_USER_AGENT: &str = "MODSHELF_USER_AGENT";

/// Settings for the catalog HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub api_key: ConfigSource,
    pub page_size: ConfigSource,
    pub timeout_secs: ConfigSource,
    pub user_agent: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    catalog: Option<CatalogSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct CatalogSection {
    base_url: Option<String>,
    api_key: Option<String>,
    page_size: Option<u32>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl CatalogConfig {
    /// Load config from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, CatalogError> {
        let file = config_path().and_then(|p| load_config_file(&p));
        resolve(&|var| std::env::var(var).ok(), file.as_ref()).map(|(config, _)| config)
    }

    /// Apply explicit values (e.g., from CLI args) on top of loaded config.
    pub fn with_overrides(mut self, base_url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        self
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Return the path to the catalog config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("modshelf").join("catalog.toml"))
}

/// Save config to `path`, creating parent directories as needed.
///
/// Fields equal to their defaults are left out of the file.
pub fn save_to_file(config: &CatalogConfig, path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let defaults = CatalogConfig::default();
    let file = ConfigFile {
        catalog: Some(CatalogSection {
            base_url: (config.base_url != defaults.base_url).then(|| config.base_url.clone()),
            api_key: config.api_key.clone(),
            page_size: (config.page_size != defaults.page_size).then_some(config.page_size),
            timeout_secs: (config.timeout_secs != defaults.timeout_secs)
                .then_some(config.timeout_secs),
            user_agent: (config.user_agent != defaults.user_agent)
                .then(|| config.user_agent.clone()),
        }),
    };

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| CatalogError::config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each config field is coming from.
pub fn config_sources() -> ConfigSources {
    let file = config_path().and_then(|p| load_config_file(&p));
    sources(&|var| std::env::var(var).ok(), file.as_ref())
}

fn load_config_file(path: &Path) -> Option<CatalogSection> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ConfigFile>(&content) {
        Ok(config) => config.catalog,
        Err(e) => {
            log::warn!("Ignoring malformed config file {}: {}", path.display(), e);
            None
        }
    }
}

fn parse_env<T: std::str::FromStr>(
    env: &dyn Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, CatalogError> {
    match env(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CatalogError::config(format!("Invalid value for {}: '{}'", var, raw))),
        None => Ok(None),
    }
}

fn resolve(
    env: &dyn Fn(&str) -> Option<String>,
    file: Option<&CatalogSection>,
) -> Result<(CatalogConfig, ConfigSources), CatalogError> {
    let defaults = CatalogConfig::default();

    let base_url = env(ENV_BASE_URL)
        .or_else(|| file.and_then(|f| f.base_url.clone()))
        .unwrap_or(defaults.base_url);
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(CatalogError::config(format!(
            "Catalog URL must start with http:// or https://, got '{}'",
            base_url
        )));
    }

    let api_key = env(ENV_API_KEY).or_else(|| file.and_then(|f| f.api_key.clone()));

    let page_size = parse_env::<u32>(env, ENV_PAGE_SIZE)?
        .or_else(|| file.and_then(|f| f.page_size))
        .unwrap_or(defaults.page_size);
    if page_size == 0 {
        return Err(CatalogError::config("Page size must be at least 1"));
    }

    let timeout_secs = parse_env::<u64>(env, ENV_TIMEOUT)?
        .or_else(|| file.and_then(|f| f.timeout_secs))
        .unwrap_or(defaults.timeout_secs);

    let user_agent = env(ENV_USER_AGENT)
        .or_else(|| file.and_then(|f| f.user_agent.clone()))
        .unwrap_or(defaults.user_agent);

    let config = CatalogConfig {
        base_url,
        api_key,
        page_size,
        timeout_secs,
        user_agent,
    };
    Ok((config, sources(env, file)))
}

fn source_of(
    env: &dyn Fn(&str) -> Option<String>,
    var: &'static str,
    in_file: bool,
    fallback: ConfigSource,
) -> ConfigSource {
    if env(var).is_some() {
        ConfigSource::EnvVar(var)
    } else if in_file {
        ConfigSource::ConfigFile
    } else {
        fallback
    }
}

fn sources(env: &dyn Fn(&str) -> Option<String>, file: Option<&CatalogSection>) -> ConfigSources {
    let f = file.cloned().unwrap_or_default();
    ConfigSources {
        base_url: source_of(env, ENV_BASE_URL, f.base_url.is_some(), ConfigSource::Default),
        api_key: source_of(env, ENV_API_KEY, f.api_key.is_some(), ConfigSource::Missing),
        page_size: source_of(env, ENV_PAGE_SIZE, f.page_size.is_some(), ConfigSource::Default),
        timeout_secs: source_of(env, ENV_TIMEOUT, f.timeout_secs.is_some(), ConfigSource::Default),
        user_agent: source_of(env, ENV_USER_AGENT, f.user_agent.is_some(), ConfigSource::Default),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
