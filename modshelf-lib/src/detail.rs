//! Detail view of one catalog entry: the entry plus its files, grouped by
//! the game version they target.

use std::cmp::Ordering;

use modshelf_catalog::{CatalogClient, CatalogError};
use modshelf_core::{AddonFile, CatalogEntry};

#[derive(Debug, Clone)]
pub struct EntryDetail {
    pub entry: CatalogEntry,
    pub files: Vec<AddonFile>,
}

impl EntryDetail {
    pub fn new(entry: CatalogEntry, mut files: Vec<AddonFile>) -> Self {
        files.sort_by(|a, b| b.file_date.cmp(&a.file_date).then(b.id.cmp(&a.id)));
        Self { entry, files }
    }

    /// Files grouped by game version, newest game version first.
    ///
    /// Loader tags ("Forge", "Fabric") are not game versions and are skipped.
    /// A file that targets several versions appears under each of them.
    pub fn files_by_game_version(&self) -> Vec<(String, Vec<&AddonFile>)> {
        let mut versions: Vec<&str> = self
            .files
            .iter()
            .flat_map(|f| f.game_version.iter().map(String::as_str))
            .filter(|v| is_game_version(v))
            .collect();
        versions.sort_by(|a, b| compare_game_versions(b, a));
        versions.dedup();

        versions
            .into_iter()
            .map(|v| {
                let files = self.files.iter().filter(|f| f.supports(v)).collect();
                (v.to_string(), files)
            })
            .collect()
    }

    /// Files for one game version, newest first. Empty matches every file.
    pub fn files_for(&self, game_version: &str) -> Vec<&AddonFile> {
        self.files
            .iter()
            .filter(|f| game_version.is_empty() || f.supports(game_version))
            .collect()
    }
}

/// Fetch an entry and all of its files.
pub async fn load_detail(
    catalog: &dyn CatalogClient,
    id: i32,
) -> Result<EntryDetail, CatalogError> {
    let entry = catalog.get_addon(id).await?;
    let files = catalog.get_files(id).await?;
    log::debug!("Loaded {} files for entry {} ({})", files.len(), id, entry.name);
    Ok(EntryDetail::new(entry, files))
}

fn is_game_version(tag: &str) -> bool {
    tag.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Order dotted game versions numerically ("1.9" < "1.10").
///
/// Non-numeric suffixes ("-Snapshot") compare as text after the numbers.
pub fn compare_game_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split(['.', '-']);
    let mut right = b.split(['.', '-']);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u32>(), y.parse::<u32>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Ok(_), Err(_)) => Ordering::Greater,
                    (Err(_), Ok(_)) => Ordering::Less,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn file(id: i32, day: u32, versions: &[&str]) -> AddonFile {
        AddonFile {
            id,
            display_name: format!("file-{}", id),
            file_name: format!("file-{}.jar", id),
            file_date: Some(Utc.with_ymd_and_hms(2021, 1, day, 0, 0, 0).unwrap()),
            file_length: 1024,
            release_type: 1,
            download_url: None,
            game_version: versions.iter().map(|s| s.to_string()).collect(),
            dependencies: Vec::new(),
        }
    }

    #[test]
    fn groups_by_version_newest_first() {
        let detail = EntryDetail::new(
            CatalogEntry::new(1, "JEI"),
            vec![
                file(1, 1, &["1.9", "Forge"]),
                file(2, 3, &["1.10", "1.10.2"]),
                file(3, 2, &["1.10"]),
            ],
        );

        let groups = detail.files_by_game_version();
        let keys: Vec<&str> = groups.iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(keys, vec!["1.10.2", "1.10", "1.9"]);

        let ten: Vec<i32> = groups[1].1.iter().map(|f| f.id).collect();
        assert_eq!(ten, vec![2, 3], "files newest first");
    }

    #[test]
    fn files_for_filters_by_version() {
        let detail = EntryDetail::new(
            CatalogEntry::new(1, "JEI"),
            vec![file(1, 1, &["1.12.2"]), file(2, 2, &["1.16.5"])],
        );
        assert_eq!(detail.files_for("1.12.2").len(), 1);
        assert_eq!(detail.files_for("").len(), 2);
        assert!(detail.files_for("1.7.10").is_empty());
    }

    struct OneEntry;

    impl CatalogClient for OneEntry {
        fn search_paginated<'a>(
            &'a self,
            _game_version: &'a str,
            _category_id: i32,
            _section: modshelf_core::Section,
            _page_offset: i32,
            _filter: &'a str,
            _sort: modshelf_core::SortMode,
        ) -> modshelf_catalog::CatalogFuture<'a, Vec<CatalogEntry>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn get_categories(
            &self,
            _section: modshelf_core::Section,
        ) -> modshelf_catalog::CatalogFuture<'_, Vec<modshelf_core::Category>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn get_addon(&self, id: i32) -> modshelf_catalog::CatalogFuture<'_, CatalogEntry> {
            Box::pin(async move {
                if id == 42 {
                    Ok(CatalogEntry::new(42, "Answer"))
                } else {
                    Err(CatalogError::NotFound(id))
                }
            })
        }

        fn get_files(&self, _id: i32) -> modshelf_catalog::CatalogFuture<'_, Vec<AddonFile>> {
            Box::pin(async { Ok(vec![file(1, 1, &["1.12.2"]), file(2, 5, &["1.12.2"])]) })
        }
    }

    #[test]
    fn load_detail_fetches_entry_and_files() {
        let rt = tokio::runtime::Runtime::new().unwrap();

        let detail = rt.block_on(load_detail(&OneEntry, 42)).unwrap();
        assert_eq!(detail.entry.name, "Answer");
        let ids: Vec<i32> = detail.files.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let missing = rt.block_on(load_detail(&OneEntry, 7));
        assert!(matches!(missing, Err(CatalogError::NotFound(7))));
    }

    #[test]
    fn version_ordering() {
        assert_eq!(compare_game_versions("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare_game_versions("1.16.5", "1.16"), Ordering::Greater);
        assert_eq!(compare_game_versions("1.12.2", "1.12.2"), Ordering::Equal);
        assert_eq!(compare_game_versions("1.14-Snapshot", "1.14.1"), Ordering::Less);
    }
}
