use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog entry (addon) as returned by search and detail queries.
///
/// Field names follow the catalog's camelCase JSON. Everything except
/// `id` and `name` is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub download_count: f64,
    #[serde(default)]
    pub popularity_score: f64,
    #[serde(default)]
    pub primary_category_id: i32,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub categories: Vec<CategoryTag>,
    #[serde(default)]
    pub latest_files: Vec<AddonFile>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_released: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Minimal entry, mostly useful for fakes and fixtures.
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: String::new(),
            summary: String::new(),
            website_url: String::new(),
            download_count: 0.0,
            popularity_score: 0.0,
            primary_category_id: 0,
            authors: Vec::new(),
            attachments: Vec::new(),
            categories: Vec::new(),
            latest_files: Vec::new(),
            date_created: None,
            date_modified: None,
            date_released: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_category(mut self, category: CategoryTag) -> Self {
        self.categories.push(category);
        self
    }

    /// The attachment marked as default, used as the list icon.
    ///
    /// When several are marked the last one wins, matching how a list cell
    /// overwrites its icon for every default attachment it sees.
    pub fn default_attachment(&self) -> Option<&Attachment> {
        self.attachments.iter().rev().find(|a| a.is_default)
    }

    /// Category ids attached to this entry, in catalog order.
    pub fn category_ids(&self) -> Vec<i32> {
        self.categories.iter().map(|c| c.category_id).collect()
    }

    /// Comma-separated author names.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Latest files built for a given game version, newest first.
    ///
    /// An empty `game_version` matches every file.
    pub fn files_for_version(&self, game_version: &str) -> Vec<&AddonFile> {
        let mut files: Vec<&AddonFile> = self
            .latest_files
            .iter()
            .filter(|f| game_version.is_empty() || f.supports(game_version))
            .collect();
        files.sort_by(|a, b| b.file_date.cmp(&a.file_date));
        files
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// An image attached to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub url: String,
}

impl Attachment {
    pub fn new(thumbnail_url: impl Into<String>, is_default: bool) -> Self {
        let thumbnail_url = thumbnail_url.into();
        Self {
            id: 0,
            title: String::new(),
            description: String::new(),
            is_default,
            url: thumbnail_url.clone(),
            thumbnail_url,
        }
    }
}

/// A category tag on a catalog entry (not the category tree node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTag {
    pub category_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl CategoryTag {
    pub fn new(category_id: i32, name: impl Into<String>) -> Self {
        Self {
            category_id,
            name: name.into(),
            url: String::new(),
            avatar_url: String::new(),
        }
    }
}

/// Release channel of an addon file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Release,
    Beta,
    Alpha,
    Unknown(u8),
}

impl std::fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::Beta => write!(f, "beta"),
            Self::Alpha => write!(f, "alpha"),
            Self::Unknown(n) => write!(f, "type {}", n),
        }
    }
}

/// A downloadable file of an addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonFile {
    pub id: i32,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_length: u64,
    /// 1 = release, 2 = beta, 3 = alpha.
    #[serde(default)]
    pub release_type: u8,
    #[serde(default)]
    pub download_url: Option<String>,
    /// Game versions and loaders this file targets (e.g. "1.16.5", "Forge").
    #[serde(default)]
    pub game_version: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<FileDependency>,
}

impl AddonFile {
    pub fn release_type(&self) -> ReleaseType {
        match self.release_type {
            1 => ReleaseType::Release,
            2 => ReleaseType::Beta,
            3 => ReleaseType::Alpha,
            n => ReleaseType::Unknown(n),
        }
    }

    pub fn supports(&self, game_version: &str) -> bool {
        self.game_version.iter().any(|v| v == game_version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDependency {
    pub addon_id: i32,
    /// 1 = embedded, 2 = optional, 3 = required, 4 = tool, 5 = incompatible, 6 = include.
    #[serde(rename = "type", default)]
    pub kind: u8,
}

#[cfg(test)]
#[path = "tests/addon_tests.rs"]
mod tests;
