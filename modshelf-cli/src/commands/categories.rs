use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modshelf_core::{Section, find_category};
use modshelf_lib::{JarVersionResolver, SearchPage};

use crate::CliError;
use crate::cli_types::CatalogArgs;
use crate::spinner::LoadingSpinner;

/// Print the section's categories as an indented list.
pub(crate) fn run_categories(
    section: Section,
    catalog: CatalogArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let client = crate::connect(&catalog)?;
    let timeout = Duration::from_secs(client.config().timeout_secs.saturating_add(5));

    let rt = crate::create_runtime()?;
    let mut page = SearchPage::new(
        section,
        Arc::new(client),
        Arc::new(JarVersionResolver),
        rt.handle().clone(),
    );

    let spinner = LoadingSpinner::new(quiet, "Loading categories...");
    spinner.start();
    page.load_categories();
    let answered = page.wait_for_categories(timeout);
    spinner.clear();
    if !answered {
        return Err(CliError::runtime("Timed out waiting for the catalog"));
    }

    log::info!(
        "{} categories",
        section.display_name().if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    for row in page.categories() {
        if row.is_none() {
            log::info!(
                "  {:>6}  {}",
                0,
                "(all categories)".if_supports_color(Stdout, |t| t.dimmed())
            );
            continue;
        }
        let name = find_category(page.category_forest(), row.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("?");
        log::info!(
            "  {:>6}  {}{}",
            row.category_id.if_supports_color(Stdout, |t| t.cyan()),
            "  ".repeat(row.indent),
            name,
        );
    }

    if page.categories().len() == 1 {
        log::warn!("No categories were returned; only the unfiltered search is available");
    }

    Ok(())
}
