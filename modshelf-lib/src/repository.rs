use std::io;
use std::path::{Path, PathBuf};

use modshelf_core::util::{is_blank, non_blank};

/// A named game directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub game_dir: PathBuf,
}

impl Profile {
    pub fn new(name: impl Into<String>, game_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            game_dir: game_dir.into(),
        }
    }

    pub fn repository(&self) -> GameRepository {
        GameRepository::new(&self.game_dir)
    }
}

/// A profile plus the installed version the page is bound to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileVersion {
    pub profile: Profile,
    pub version: Option<String>,
}

impl ProfileVersion {
    pub fn new(profile: Profile, version: Option<String>) -> Self {
        Self { profile, version }
    }

    /// The selected version, treating blank names as no selection.
    pub fn selected_version(&self) -> Option<&str> {
        non_blank(self.version.as_deref())
    }

    /// Jar of the selected version, if one is selected.
    pub fn selected_jar(&self) -> Option<PathBuf> {
        self.selected_version()
            .map(|v| self.profile.repository().version_jar(v))
    }
}

/// Read-only view of the `versions/` layout inside a game directory.
///
/// Each installed version lives in `versions/<id>/` with `<id>.json` and,
/// for versions that ship their own jar, `<id>.jar`.
#[derive(Debug, Clone)]
pub struct GameRepository {
    base: PathBuf,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionManifest {
    #[serde(default)]
    jar: Option<String>,
    #[serde(default)]
    inherits_from: Option<String>,
}

impl GameRepository {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.base.join("versions")
    }

    pub fn version_root(&self, id: &str) -> PathBuf {
        self.versions_dir().join(id)
    }

    pub fn version_json(&self, id: &str) -> PathBuf {
        self.version_root(id).join(format!("{}.json", id))
    }

    /// Jar that holds the game classes for `id`.
    ///
    /// Modded versions usually borrow the jar of the version they inherit
    /// from; the manifest's `jar` field, then `inheritsFrom`, name that
    /// version. Without a readable manifest the version's own jar is used.
    pub fn version_jar(&self, id: &str) -> PathBuf {
        let jar_id = self.jar_id(id);
        self.version_root(&jar_id).join(format!("{}.jar", jar_id))
    }

    fn jar_id(&self, id: &str) -> String {
        let manifest = std::fs::read_to_string(self.version_json(id))
            .ok()
            .and_then(|text| serde_json::from_str::<VersionManifest>(&text).ok())
            .unwrap_or_default();
        manifest
            .jar
            .or(manifest.inherits_from)
            .filter(|j| !is_blank(j))
            .unwrap_or_else(|| id.to_string())
    }

    pub fn has_version(&self, id: &str) -> bool {
        self.version_root(id).is_dir()
    }

    /// Installed version ids, sorted. A missing `versions/` dir is empty.
    pub fn versions(&self) -> io::Result<Vec<String>> {
        let dir = self.versions_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if self.version_json(&id).is_file() || self.version_jar(&id).is_file() {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install(base: &Path, id: &str, json: Option<&str>, jar: bool) {
        let root = base.join("versions").join(id);
        fs::create_dir_all(&root).unwrap();
        if let Some(json) = json {
            fs::write(root.join(format!("{}.json", id)), json).unwrap();
        }
        if jar {
            fs::write(root.join(format!("{}.jar", id)), b"PK").unwrap();
        }
    }

    #[test]
    fn lists_installed_versions_sorted() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), "1.16.5", Some("{}"), true);
        install(tmp.path(), "1.12.2", None, true);
        install(tmp.path(), "1.16.5-forge", Some(r#"{"inheritsFrom": "1.16.5"}"#), false);
        fs::create_dir_all(tmp.path().join("versions").join("empty")).unwrap();

        let repo = GameRepository::new(tmp.path());
        assert_eq!(
            repo.versions().unwrap(),
            vec!["1.12.2", "1.16.5", "1.16.5-forge"]
        );
        assert!(repo.has_version("empty"));
    }

    #[test]
    fn missing_versions_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(GameRepository::new(tmp.path()).versions().unwrap().is_empty());
    }

    #[test]
    fn jar_follows_manifest() {
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), "1.16.5", Some("{}"), true);
        install(tmp.path(), "forge", Some(r#"{"inheritsFrom": "1.16.5"}"#), false);
        install(tmp.path(), "custom", Some(r#"{"jar": "1.16.5", "inheritsFrom": "other"}"#), false);

        let repo = GameRepository::new(tmp.path());
        let vanilla = tmp.path().join("versions").join("1.16.5").join("1.16.5.jar");
        assert_eq!(repo.version_jar("1.16.5"), vanilla);
        assert_eq!(repo.version_jar("forge"), vanilla);
        assert_eq!(repo.version_jar("custom"), vanilla);
        assert_eq!(
            repo.version_jar("unknown"),
            tmp.path().join("versions").join("unknown").join("unknown.jar")
        );
    }

    #[test]
    fn blank_version_is_no_selection() {
        let profile = Profile::new("Default", "/games/mc");
        let blank = ProfileVersion::new(profile.clone(), Some("  ".into()));
        assert_eq!(blank.selected_version(), None);
        assert_eq!(blank.selected_jar(), None);

        let none = ProfileVersion::new(profile.clone(), None);
        assert_eq!(none.selected_jar(), None);

        let chosen = ProfileVersion::new(profile, Some("1.12.2".into()));
        assert_eq!(
            chosen.selected_jar(),
            Some(PathBuf::from("/games/mc/versions/1.12.2/1.12.2.jar"))
        );
    }
}
