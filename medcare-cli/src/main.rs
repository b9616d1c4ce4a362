//! medcare CLI
//!
//! Command-line interface for reconciling and normalizing the product
//! catalog snapshot.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use medcare_import::{Settings, settings_path};

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::commands::reconcile::ReconcileArgs;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("error: failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings_file = cli.config.unwrap_or_else(settings_path);
    let settings = Settings::load(&settings_file)?;

    match cli.command {
        Commands::Reconcile {
            current,
            previous,
            extra,
            output,
            dry_run,
        } => commands::reconcile::run_reconcile(
            &settings,
            ReconcileArgs {
                current,
                previous,
                extra,
                output,
                dry_run,
            },
            cli.verbose,
        ),
        Commands::Autofill { file } => commands::autofill::run_autofill(&settings, file),
        Commands::Normalize { file } => commands::normalize::run_normalize(&settings, file),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings_file, &settings),
            ConfigAction::Path => {
                commands::config::run_config_path(&settings_file);
                Ok(())
            }
        },
    }
}
