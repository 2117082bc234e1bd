//! Detect the game version embedded in a game jar.
//!
//! Strategies, tried in order:
//! 1. `version.json` at the jar root (`name`, then `id`)
//! 2. the client main class's "Minecraft Minecraft <version>" banner
//! 3. the server class's version literal, found just before its
//!    "Can't keep up!" warning

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::class_file::string_constants;
use crate::error::VersionError;

const VERSION_JSON: &str = "version.json";
const CLIENT_CLASS: &str = "net/minecraft/client/Minecraft.class";
const SERVER_CLASS: &str = "net/minecraft/server/MinecraftServer.class";
const CLIENT_BANNER: &str = "Minecraft Minecraft ";
const SERVER_ANCHOR: &str = "Can't keep up!";

/// Upper bound on the buffer reserved up front for one jar entry.
const MAX_PREALLOC: u64 = 1 << 20;

/// Resolves the game version of an installed version's jar.
///
/// Implementations are blocking and are only called from a worker thread.
pub trait VersionResolver: Send + Sync {
    /// The embedded version string, or `None` when it cannot be determined.
    fn minecraft_version(&self, jar: &Path) -> Option<String>;
}

/// [`VersionResolver`] that inspects the jar on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct JarVersionResolver;

impl VersionResolver for JarVersionResolver {
    fn minecraft_version(&self, jar: &Path) -> Option<String> {
        minecraft_version(jar)
    }
}

/// Read the game version out of a jar, failing silently to `None`.
pub fn minecraft_version(jar: &Path) -> Option<String> {
    if !jar.is_file() {
        log::debug!("No game jar at {}", jar.display());
        return None;
    }
    match inspect_jar(jar) {
        Ok(Some(version)) => {
            log::debug!("Detected game version {} in {}", version, jar.display());
            Some(version)
        }
        Ok(None) => {
            log::debug!("No version marker found in {}", jar.display());
            None
        }
        Err(e) => {
            log::debug!("Failed to inspect {}: {}", jar.display(), e);
            None
        }
    }
}

/// Run every detection strategy against the jar at `path`.
pub fn inspect_jar(path: &Path) -> Result<Option<String>, VersionError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    if let Some(bytes) = read_entry(&mut archive, VERSION_JSON)? {
        if let Some(version) = version_from_json(&bytes)? {
            return Ok(Some(version));
        }
    }

    if let Some(bytes) = read_entry(&mut archive, CLIENT_CLASS)? {
        if let Some(version) = version_from_client_class(&bytes)? {
            return Ok(Some(version));
        }
    }

    if let Some(bytes) = read_entry(&mut archive, SERVER_CLASS)? {
        return version_from_server_class(&bytes);
    }

    Ok(None)
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, VersionError> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            // The header size is only a hint; a crafted jar can claim gigabytes.
            let hint = entry.size().min(MAX_PREALLOC) as usize;
            let mut buf = Vec::with_capacity(hint);
            entry.read_to_end(&mut buf)?;
            Ok(Some(buf))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn version_from_json(bytes: &[u8]) -> Result<Option<String>, VersionError> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(["name", "id"]
        .iter()
        .filter_map(|key| doc.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string))
}

fn version_from_client_class(bytes: &[u8]) -> Result<Option<String>, VersionError> {
    Ok(string_constants(bytes)?
        .into_iter()
        .find_map(|s| s.strip_prefix(CLIENT_BANNER).map(|v| v.trim().to_string()))
        .filter(|v| !v.is_empty()))
}

fn version_from_server_class(bytes: &[u8]) -> Result<Option<String>, VersionError> {
    let strings = string_constants(bytes)?;
    let Some(anchor) = strings.iter().position(|s| s.starts_with(SERVER_ANCHOR)) else {
        return Ok(None);
    };
    Ok(strings[..anchor]
        .iter()
        .rev()
        .find(|s| looks_like_version(s))
        .cloned())
}

/// "1.7.10", "1.14 Pre-Release 2", "20w14a".
fn looks_like_version(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
}

#[cfg(test)]
#[path = "tests/game_version_tests.rs"]
mod tests;
