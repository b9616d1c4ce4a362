use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use medcare_catalog::{load_snapshot_required, save_snapshot};
use medcare_import::{Settings, autofill_all};

use super::{resolve_current, verb};
use crate::cli_types::FileArgs;
use crate::error::CliError;

/// Run the `autofill` command.
pub(crate) fn run_autofill(settings: &Settings, args: FileArgs) -> Result<(), CliError> {
    let config = settings.reconcile_config()?;
    let path = resolve_current(args.file, settings)?;

    let mut records = load_snapshot_required(&path)?;
    let updated = autofill_all(&config.schema, &mut records);

    if !args.dry_run && updated > 0 {
        save_snapshot(&path, &records)?;
    }

    log::info!(
        "{} details for {} records. Total: {}",
        verb(args.dry_run, "Would auto-fill", "Auto-filled"),
        updated.if_supports_color(Stdout, |t| t.bold()),
        records.len(),
    );
    Ok(())
}
