pub(crate) mod autofill;
pub(crate) mod config;
pub(crate) mod normalize;
pub(crate) mod reconcile;

use std::path::PathBuf;

use medcare_import::Settings;

use crate::error::CliError;

/// Resolve the snapshot to work on: CLI override first, then
/// `paths.current` from the settings file.
pub(crate) fn resolve_current(
    cli_override: Option<PathBuf>,
    settings: &Settings,
) -> Result<PathBuf, CliError> {
    cli_override
        .or_else(|| settings.paths.current.clone())
        .ok_or_else(|| {
            CliError::missing_path(
                "no snapshot given; pass one on the command line or set paths.current in settings.toml",
            )
        })
}

/// Shared tail for commands that report "would" vs "did".
pub(crate) fn verb(dry_run: bool, would: &'static str, did: &'static str) -> &'static str {
    if dry_run { would } else { did }
}
