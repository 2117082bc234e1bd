use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::runtime::Handle;

use modshelf_catalog::CatalogClient;
use modshelf_core::CatalogEntry;
use modshelf_core::util::format_bytes_approx;
use modshelf_lib::{DownloadCallback, EntryDetail, Navigator, ProfileVersion, load_detail};

/// How many game versions to list before eliding the rest.
const MAX_VERSION_GROUPS: usize = 5;
const MAX_FILES_PER_GROUP: usize = 3;

/// Navigator that prints the detail page to the terminal.
pub(crate) struct DetailPrinter {
    catalog: Arc<dyn CatalogClient>,
    runtime: Handle,
}

impl DetailPrinter {
    pub(crate) fn new(catalog: Arc<dyn CatalogClient>, runtime: Handle) -> Self {
        Self { catalog, runtime }
    }
}

impl Navigator for DetailPrinter {
    fn navigate(
        &self,
        entry: &CatalogEntry,
        version: Option<&ProfileVersion>,
        _callback: Option<Arc<dyn DownloadCallback>>,
    ) {
        let detail = match self
            .runtime
            .block_on(load_detail(self.catalog.as_ref(), entry.id))
        {
            Ok(detail) => detail,
            Err(e) => {
                log::warn!("Failed to load details for {}: {}", entry.name, e);
                return;
            }
        };
        print_detail(&detail, version);
    }
}

fn print_detail(detail: &EntryDetail, version: Option<&ProfileVersion>) {
    let entry = &detail.entry;
    log::info!("{}", entry.name.if_supports_color(Stdout, |t| t.bold()));
    if !entry.summary.is_empty() {
        log::info!("  {}", entry.summary);
    }
    if !entry.website_url.is_empty() {
        log::info!(
            "  {}",
            entry.website_url.if_supports_color(Stdout, |t| t.cyan())
        );
    }
    if let Some(selected) = version.and_then(|v| v.selected_version()) {
        log::info!(
            "  Target: {}",
            selected.if_supports_color(Stdout, |t| t.green())
        );
    }
    crate::log_blank();

    let groups = detail.files_by_game_version();
    if groups.is_empty() {
        log::info!(
            "  {}",
            "No files published.".if_supports_color(Stdout, |t| t.dimmed())
        );
        return;
    }

    for (game_version, files) in groups.iter().take(MAX_VERSION_GROUPS) {
        log::info!("  {}", game_version.if_supports_color(Stdout, |t| t.bold()));
        for file in files.iter().take(MAX_FILES_PER_GROUP) {
            log::info!(
                "    {} {} ({})",
                file.display_name,
                format!("[{}]", file.release_type()).if_supports_color(Stdout, |t| t.dimmed()),
                format_bytes_approx(file.file_length),
            );
        }
        if files.len() > MAX_FILES_PER_GROUP {
            log::info!(
                "    {}",
                format!("... and {} more", files.len() - MAX_FILES_PER_GROUP)
                    .if_supports_color(Stdout, |t| t.dimmed())
            );
        }
    }
    if groups.len() > MAX_VERSION_GROUPS {
        log::info!(
            "  {}",
            format!("... {} older game versions", groups.len() - MAX_VERSION_GROUPS)
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}
