use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modshelf_catalog::CatalogClient;
use modshelf_core::util::{format_count, truncate};
use modshelf_core::{CatalogEntry, SearchQuery};
use modshelf_lib::settings::resolve_game_dir;
use modshelf_lib::{JarVersionResolver, Profile, SearchPage};

use crate::CliError;
use crate::cli_types::SearchArgs;
use crate::commands::detail::DetailPrinter;
use crate::spinner::LoadingSpinner;

/// Run one search through the page and print the results.
pub(crate) fn run_search(
    args: SearchArgs,
    game_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let client = crate::connect(&args.catalog)?;
    let page_size = client.config().page_size;
    let timeout = Duration::from_secs(client.config().timeout_secs.saturating_add(5));
    let catalog: Arc<dyn CatalogClient> = Arc::new(client);

    let rt = crate::create_runtime()?;
    let mut page = SearchPage::new(
        args.section,
        Arc::clone(&catalog),
        Arc::new(JarVersionResolver),
        rt.handle().clone(),
    )
    .with_navigator(Box::new(DetailPrinter::new(catalog, rt.handle().clone())))
    .with_version_selection(args.version.is_none());

    let spinner = LoadingSpinner::new(quiet, "Searching the catalog...");
    page.subscribe(spinner.listener());

    let profile = Profile::new("Default", resolve_game_dir(game_dir));
    log::debug!("Using game directory {}", profile.game_dir.display());

    // Binding the version issues the unfiltered first page; anything more
    // specific supersedes it.
    page.load_version(profile, args.version.clone());

    let query = SearchQuery::new()
        .with_game_version(args.game_version.clone())
        .with_category(args.category)
        .with_page_offset(page_offset(args.page, page_size)?)
        .with_name_filter(args.name.clone())
        .with_sort(args.sort);
    if query != SearchQuery::new() {
        page.search(query);
    }

    if !page.wait_until_settled(timeout) {
        spinner.clear();
        return Err(CliError::runtime("Timed out waiting for the catalog"));
    }

    if page.is_failed() {
        return Err(CliError::failed(
            "Search failed. Check your connection and try again.",
        ));
    }

    if !args.game_version.is_empty() && !page.game_version_hint_visible() {
        log::warn!(
            "--game-version is ignored while an installed version is selected",
        );
    }

    print_results(&page, args.page);
    print_installed_versions(&page);

    if let Some(n) = args.open {
        crate::log_blank();
        if n == 0 || !page.activate(n - 1) {
            log::warn!("No result #{} on this page", n);
        }
    }

    Ok(())
}

/// Catalog offset of the first entry on `page`.
fn page_offset(page: u32, page_size: u32) -> Result<i32, CliError> {
    page.checked_mul(page_size)
        .and_then(|offset| i32::try_from(offset).ok())
        .ok_or_else(|| CliError::config(format!("Page {} is out of range", page)))
}

fn print_results(page: &SearchPage, page_index: u32) {
    let game_version = page.last_game_version().unwrap_or("");
    let scope = if game_version.is_empty() {
        "all versions".to_string()
    } else {
        game_version.to_string()
    };

    log::info!(
        "{} for {} (page {})",
        page.section()
            .display_name()
            .if_supports_color(Stdout, |t| t.bold()),
        scope.if_supports_color(Stdout, |t| t.cyan()),
        page_index,
    );
    crate::log_blank();

    if page.results().is_empty() {
        log::info!(
            "{}",
            "No results.".if_supports_color(Stdout, |t| t.dimmed())
        );
        return;
    }

    for (i, entry) in page.results().iter().enumerate() {
        print_entry(i + 1, entry);
    }
}

/// Point at `--version` when the game directory has installed versions.
fn print_installed_versions(page: &SearchPage) {
    let versions = match page.installed_versions() {
        Ok(versions) => versions,
        Err(e) => {
            log::debug!("Could not list installed versions: {}", e);
            return;
        }
    };
    if versions.is_empty() {
        return;
    }

    crate::log_blank();
    log::info!(
        "{} {}",
        "Installed versions (use --version to match one):"
            .if_supports_color(Stdout, |t| t.dimmed()),
        versions.join(", "),
    );
}

fn print_entry(position: usize, entry: &CatalogEntry) {
    let tags: Vec<&str> = entry.categories.iter().map(|c| c.name.as_str()).collect();
    log::info!(
        "{:>3}. {} {}",
        position,
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", tags.join(", ")).if_supports_color(Stdout, |t| t.dimmed()),
    );

    if !entry.summary.is_empty() {
        log::info!("     {}", truncate(&entry.summary, 100));
    }

    let authors = entry.author_names();
    log::info!(
        "     {} downloads{}",
        format_count(entry.download_count),
        if authors.is_empty() {
            String::new()
        } else {
            format!(", by {}", authors)
        },
    );

    if let Some(icon) = entry.default_attachment() {
        log::info!(
            "     {}",
            icon.thumbnail_url.if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_scales_by_page_size() {
        assert_eq!(page_offset(0, 20).unwrap(), 0);
        assert_eq!(page_offset(3, 20).unwrap(), 60);
    }

    #[test]
    fn page_offset_out_of_range() {
        assert!(matches!(page_offset(u32::MAX, 20), Err(CliError::Config(_))));
        assert!(matches!(page_offset(200_000_000, 20), Err(CliError::Config(_))));
    }
}
