use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use medcare_import::{
    LogProgress, MatchMethod, ReconcileOptions, ReconcileResult, Settings, reconcile_files,
};

use super::{resolve_current, verb};
use crate::error::CliError;

/// Command-line inputs for `medcare reconcile`.
pub(crate) struct ReconcileArgs {
    pub current: Option<PathBuf>,
    pub previous: Vec<PathBuf>,
    pub extra: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Run the `reconcile` command.
pub(crate) fn run_reconcile(
    settings: &Settings,
    args: ReconcileArgs,
    verbose: bool,
) -> Result<(), CliError> {
    let config = settings.reconcile_config()?;
    let current = resolve_current(args.current, settings)?;
    let mut options = ReconcileOptions::new(current);
    options.previous = resolve_previous(args.previous, settings, options.previous);
    options.extra = args.extra;
    options.output = args.output.or_else(|| settings.paths.output.clone());
    options.dry_run = args.dry_run;

    log::info!(
        "{}",
        "Reconciling snapshots...".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Current:  {}", options.current.display());
    for path in options.previous.iter().chain(&options.extra) {
        let status = if path.exists() { "" } else { " (missing)" };
        log::info!("  Prior:    {}{}", path.display(), status);
    }

    let result = reconcile_files(&options, &config, &LogProgress::new())?;
    print_matches(&result, verbose);
    print_summary(&result, &options);

    Ok(())
}

/// Prior snapshots from the command line, else from settings, else the
/// `<stem>.previous*.json` files beside the current snapshot.
fn resolve_previous(
    cli: Vec<PathBuf>,
    settings: &Settings,
    beside_current: Vec<PathBuf>,
) -> Vec<PathBuf> {
    if !cli.is_empty() {
        cli
    } else if !settings.paths.previous.is_empty() {
        settings.paths.previous.clone()
    } else {
        beside_current
    }
}

/// List fuzzy matches (always) and exact matches (verbose only).
fn print_matches(result: &ReconcileResult, verbose: bool) {
    let fuzzy: Vec<_> = result
        .details
        .iter()
        .filter(|d| matches!(d.method, MatchMethod::Fuzzy { .. }))
        .collect();

    if !fuzzy.is_empty() {
        log::info!(
            "\n  {} ({})",
            "Fuzzy matches".if_supports_color(Stdout, |t| t.bold()),
            fuzzy.len(),
        );
        for detail in fuzzy {
            log::info!(
                "    \"{}\" <- \"{}\" [{}]",
                detail.current_name,
                detail.prior_name.if_supports_color(Stdout, |t| t.cyan()),
                detail.method.if_supports_color(Stdout, |t| t.yellow()),
            );
        }
    }

    if verbose {
        for detail in result
            .details
            .iter()
            .filter(|d| !matches!(d.method, MatchMethod::Fuzzy { .. }))
        {
            log::debug!(
                "    {} <- {} [{}]",
                detail.current_id,
                detail.prior_id,
                detail.method
            );
        }
        for detail in result.details.iter().filter(|d| !d.restored_fields.is_empty()) {
            let fields: Vec<String> = detail.restored_fields.iter().map(|f| f.to_string()).collect();
            log::debug!("    {}: restored {}", detail.current_id, fields.join(", "));
        }
    }
}

fn print_summary(result: &ReconcileResult, options: &ReconcileOptions) {
    let stats = &result.stats;

    log::info!("");
    if options.dry_run {
        log::info!(
            "{}",
            "Dry run: no changes made.".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        log::info!(
            "{}",
            "Reconciliation complete".if_supports_color(Stdout, |t| t.bold()),
        );
    }
    log::info!("  Records:          {:>6}", stats.total);
    log::info!("  Prior records:    {:>6}", stats.prior_records);
    log::info!("  Matched by id:    {:>6}", stats.matched_by_id);
    log::info!("  Matched by name:  {:>6}", stats.matched_by_slug);
    log::info!("  Matched fuzzy:    {:>6}", stats.matched_by_fuzzy);
    log::info!("  Unmatched:        {:>6}", stats.unmatched);
    log::info!(
        "  {} details for {} records",
        verb(options.dry_run, "Would restore", "Restored"),
        stats.details_restored,
    );
    if stats.fields_restored > 0 {
        log::info!("  Fields restored:  {:>6}", stats.fields_restored);
    }
    if !options.dry_run {
        let output = options.output.as_ref().unwrap_or(&options.current);
        log::info!(
            "  Wrote {}",
            output.display().if_supports_color(Stdout, |t| t.green()),
        );
    }
}
