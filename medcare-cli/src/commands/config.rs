use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use medcare_import::Settings;

use crate::error::CliError;

/// Show the settings file location and the effective reconcile settings.
pub(crate) fn run_config_show(path: &Path, settings: &Settings) -> Result<(), CliError> {
    let config = settings.reconcile_config()?;

    log::info!(
        "{}",
        "MedCare Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let show_path = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    };
    log::info!("  Current snapshot: {}", show_path(settings.paths.current.as_deref()));
    if settings.paths.previous.is_empty() {
        log::info!("  Prior snapshots:  (not set)");
    }
    for (i, prev) in settings.paths.previous.iter().enumerate() {
        log::info!("  Prior snapshot {}: {}", i + 1, prev.display());
    }
    log::info!("  Output:           {}", show_path(settings.paths.output.as_deref()));
    log::info!("");

    let mut stopwords: Vec<&str> = config.stopwords.iter().map(String::as_str).collect();
    stopwords.sort_unstable();
    let prefer: Vec<String> = config.prefer_fields.iter().map(|f| f.to_string()).collect();

    let overrides = toml::to_string_pretty(settings)?;
    if !overrides.trim().is_empty() {
        log::info!("  {}", "Settings file values:".if_supports_color(Stdout, |t| t.bold()));
        for line in overrides.lines() {
            log::info!("    {}", line);
        }
        log::info!("");
    }

    log::info!("  Fuzzy threshold:  {}", config.fuzzy_threshold);
    log::info!("  Brand label:      {}", config.brand_label);
    log::info!("  Stopwords:        {}", stopwords.join(", "));
    log::info!("  Preferred fields: {}", prefer.join(", "));
    log::info!("  Detail labels:");
    for spec in config.schema.specs() {
        match spec.field {
            Some(field) => log::info!("    {:<20} <- {}", spec.label, field),
            None => log::info!("    {}", spec.label),
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(path: &Path) {
    log::info!("{}", path.display());
}
