use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use modshelf_lib::settings::resolve_game_dir;
use modshelf_lib::{Profile, ProfileVersion, minecraft_version};

use crate::CliError;

/// List installed versions with the game version found in each jar.
pub(crate) fn run_versions(game_dir: Option<PathBuf>) -> Result<(), CliError> {
    let profile = Profile::new("Default", resolve_game_dir(game_dir));
    let ids = profile.repository().versions()?;

    log::info!(
        "Installed versions in {}",
        profile
            .game_dir
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );
    crate::log_blank();

    if ids.is_empty() {
        log::info!(
            "  {}",
            "No installed versions found.".if_supports_color(Stdout, |t| t.dimmed())
        );
        return Ok(());
    }

    let width = ids.iter().map(|id| id.len()).max().unwrap_or(0);
    for id in ids {
        let version = ProfileVersion::new(profile.clone(), Some(id.clone()));
        let detected = version.selected_jar().and_then(|jar| minecraft_version(&jar));
        match detected {
            Some(v) => log::info!(
                "  {:<width$}  {}",
                id,
                v.if_supports_color(Stdout, |t| t.green()),
                width = width
            ),
            None => log::info!(
                "  {:<width$}  {}",
                id,
                "(unknown)".if_supports_color(Stdout, |t| t.yellow()),
                width = width
            ),
        }
    }

    Ok(())
}
