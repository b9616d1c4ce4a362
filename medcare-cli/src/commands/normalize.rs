use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use medcare_catalog::{load_snapshot_required, save_snapshot};
use medcare_import::Settings;

use super::{resolve_current, verb};
use crate::cli_types::FileArgs;
use crate::error::CliError;

/// Run the `normalize` command.
pub(crate) fn run_normalize(settings: &Settings, args: FileArgs) -> Result<(), CliError> {
    let config = settings.reconcile_config()?;
    let path = resolve_current(args.file, settings)?;

    let mut records = load_snapshot_required(&path)?;
    let mut changed = 0usize;
    for record in records.iter_mut() {
        let before = record.details.clone();
        config.schema.normalize(record);
        if record.details != before {
            changed += 1;
        }
    }

    if !args.dry_run && changed > 0 {
        save_snapshot(&path, &records)?;
    }

    log::info!(
        "{} {} of {} records",
        verb(args.dry_run, "Would normalize", "Normalized"),
        changed.if_supports_color(Stdout, |t| t.bold()),
        records.len(),
    );
    Ok(())
}
