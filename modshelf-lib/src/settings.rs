//! Shared application settings (game directory, config file location).
//!
//! The settings file is `~/.config/modshelf/settings.toml`; every frontend
//! resolves the game directory through the same priority chain.

use std::io;
use std::path::{Path, PathBuf};

/// Canonical path to the shared settings file: `~/.config/modshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("modshelf").join("settings.toml")
}

/// Platform default game directory (`~/.minecraft` and friends).
pub fn default_game_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("minecraft")
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minecraft")
    }
}

/// Resolve the game directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `game.dir` in `settings.toml`
/// 3. Platform default
pub fn resolve_game_dir(cli_override: Option<PathBuf>) -> PathBuf {
    if let Some(p) = cli_override {
        return p;
    }
    if let Some(p) = load_game_dir_from(&settings_path()) {
        return p;
    }
    default_game_dir()
}

/// Read `game.dir` from a settings file, if set.
pub fn load_game_dir_from(settings: &Path) -> Option<PathBuf> {
    let contents = std::fs::read_to_string(settings).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let dir = doc.get("game")?.get("dir")?.as_str()?;
    if dir.is_empty() {
        None
    } else {
        Some(PathBuf::from(dir))
    }
}

/// Save (or clear) the game directory in the shared `settings.toml`.
pub fn save_game_dir(dir: Option<&Path>) -> io::Result<()> {
    save_game_dir_to(&settings_path(), dir)
}

/// Save (or clear) `game.dir` in the given settings file.
///
/// Uses `toml::Value` for a surgical update so unrelated keys survive.
pub fn save_game_dir_to(settings: &Path, dir: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(settings) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let game = table
        .entry("game")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let game_table = game
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[game] is not a table"))?;

    match dir {
        Some(p) => {
            game_table.insert(
                "dir".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            game_table.remove("dir");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}
