use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;

use modshelf_core::{AddonFile, CatalogEntry, Category, MINECRAFT_GAME_ID, Section, SortMode, reorganize_categories};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, excerpt};

/// Boxed future returned by [`CatalogClient`] methods.
pub type CatalogFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CatalogError>> + Send + 'a>>;

/// Abstract access to the mod catalog.
///
/// The search page only talks to the catalog through this trait, so tests
/// and alternative backends can stand in for the HTTP client.
pub trait CatalogClient: Send + Sync {
    /// One page of search results, in catalog order.
    fn search_paginated<'a>(
        &'a self,
        game_version: &'a str,
        category_id: i32,
        section: Section,
        page_offset: i32,
        filter: &'a str,
        sort: SortMode,
    ) -> CatalogFuture<'a, Vec<CatalogEntry>>;

    /// The section's category forest.
    fn get_categories(&self, section: Section) -> CatalogFuture<'_, Vec<Category>>;

    /// Full detail for one entry.
    fn get_addon(&self, id: i32) -> CatalogFuture<'_, CatalogEntry>;

    /// Every file of one entry.
    fn get_files(&self, id: i32) -> CatalogFuture<'_, Vec<AddonFile>>;
}

/// HTTP client for the CurseForge addon API.
pub struct CurseClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CurseClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(ref key) = config.api_key {
            let value = reqwest::header::HeaderValue::from_str(key)
                .map_err(|_| CatalogError::config("API key contains invalid header characters"))?;
            headers.insert("x-api-key", value);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// `GET {base}/addon/search`.
    pub async fn search(
        &self,
        game_version: &str,
        category_id: i32,
        section: Section,
        page_offset: i32,
        filter: &str,
        sort: SortMode,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let params = search_params(
            game_version,
            category_id,
            section,
            page_offset,
            self.config.page_size,
            filter,
            sort,
        );
        log::debug!(
            "Catalog search: section={} category={} offset={} version='{}' filter='{}' sort={}",
            section.short_name(),
            category_id,
            page_offset,
            game_version,
            filter,
            sort.short_name(),
        );
        let url = format!("{}/addon/search", self.config.base());
        self.get_json(&url, &params).await
    }

    /// `GET {base}/category/section/{id}`, reorganized into a forest.
    pub async fn categories(&self, section: Section) -> Result<Vec<Category>, CatalogError> {
        let url = format!("{}/category/section/{}", self.config.base(), section.id());
        let flat: Vec<Category> = self.get_json(&url, &[]).await?;
        log::debug!("Catalog returned {} categories for {}", flat.len(), section.short_name());
        Ok(reorganize_categories(flat, section.id()))
    }

    /// `GET {base}/addon/{id}`.
    pub async fn addon(&self, id: i32) -> Result<CatalogEntry, CatalogError> {
        let url = format!("{}/addon/{}", self.config.base(), id);
        match self.get_json(&url, &[]).await {
            Err(CatalogError::Status { status: 404, .. }) => Err(CatalogError::NotFound(id)),
            other => other,
        }
    }

    /// `GET {base}/addon/{id}/files`.
    pub async fn files(&self, id: i32) -> Result<Vec<AddonFile>, CatalogError> {
        let url = format!("{}/addon/{}/files", self.config.base(), id);
        match self.get_json(&url, &[]).await {
            Err(CatalogError::Status { status: 404, .. }) => Err(CatalogError::NotFound(id)),
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let mut request = self.http.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message: excerpt(text.trim(), 200),
            });
        }

        serde_json::from_str(&text).map_err(|e| CatalogError::Parse {
            message: e.to_string(),
            excerpt: excerpt(&text, 200),
        })
    }
}

impl CatalogClient for CurseClient {
    fn search_paginated<'a>(
        &'a self,
        game_version: &'a str,
        category_id: i32,
        section: Section,
        page_offset: i32,
        filter: &'a str,
        sort: SortMode,
    ) -> CatalogFuture<'a, Vec<CatalogEntry>> {
        Box::pin(self.search(game_version, category_id, section, page_offset, filter, sort))
    }

    fn get_categories(&self, section: Section) -> CatalogFuture<'_, Vec<Category>> {
        Box::pin(self.categories(section))
    }

    fn get_addon(&self, id: i32) -> CatalogFuture<'_, CatalogEntry> {
        Box::pin(self.addon(id))
    }

    fn get_files(&self, id: i32) -> CatalogFuture<'_, Vec<AddonFile>> {
        Box::pin(self.files(id))
    }
}

/// Query parameters for the search endpoint, in the order the API lists them.
pub fn search_params(
    game_version: &str,
    category_id: i32,
    section: Section,
    page_offset: i32,
    page_size: u32,
    filter: &str,
    sort: SortMode,
) -> Vec<(&'static str, String)> {
    vec![
        ("categoryId", category_id.to_string()),
        ("gameId", MINECRAFT_GAME_ID.to_string()),
        ("gameVersion", game_version.to_string()),
        ("index", page_offset.to_string()),
        ("pageSize", page_size.to_string()),
        ("searchFilter", filter.to_string()),
        ("sectionId", section.id().to_string()),
        ("sort", sort.index().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_carry_every_field() {
        let params = search_params("1.16.5", 423, Section::Mod, 25, 25, "jei", SortMode::Popularity);
        let get = |k: &str| {
            params
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("categoryId"), Some("423"));
        assert_eq!(get("gameId"), Some("432"));
        assert_eq!(get("gameVersion"), Some("1.16.5"));
        assert_eq!(get("index"), Some("25"));
        assert_eq!(get("pageSize"), Some("25"));
        assert_eq!(get("searchFilter"), Some("jei"));
        assert_eq!(get("sectionId"), Some("6"));
        assert_eq!(get("sort"), Some("1"));
    }

    #[test]
    fn empty_hint_is_sent_verbatim() {
        let params = search_params("", 0, Section::Modpack, 0, 25, "", SortMode::DateCreated);
        assert!(params.contains(&("gameVersion", String::new())));
        assert!(params.contains(&("sectionId", "4471".to_string())));
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let config = CatalogConfig {
            api_key: Some("bad\nkey".into()),
            ..CatalogConfig::default()
        };
        assert!(matches!(CurseClient::new(config), Err(CatalogError::Config(_))));
    }
}
